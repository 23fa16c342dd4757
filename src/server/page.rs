//! 手机端页面渲染
//!
//! 页面除了插入的 IP 与端口外都是静态内容：信息卡片展示连接地址，
//! 内嵌脚本通过 `/api/history` 拉取历史、通过 `/api/set_clipboard`
//! 把手机文本推送到电脑。

use crate::netinfo;

const INDEX_STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background-color: #f5f5f5;
    color: #333;
    -webkit-font-smoothing: antialiased;
}
.container { max-width: 800px; margin: 0 auto; padding: 16px; }
.header { text-align: center; margin-bottom: 16px; }
.logo { font-size: 2em; margin-bottom: 8px; }
.info-card {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 12px;
    border-radius: 12px;
    margin: 8px 0;
    box-shadow: 0 2px 8px rgba(0,0,0,0.1);
}
.info-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 8px; margin-top: 8px; }
.info-item { background: rgba(255,255,255,0.15); padding: 8px; border-radius: 6px; text-align: center; }
.info-label { font-size: 0.75em; opacity: 0.9; margin-bottom: 2px; }
.info-value { font-weight: 600; font-size: 0.9em; }
.actions { display: flex; gap: 8px; margin: 16px 0; flex-wrap: wrap; }
button {
    flex: 1;
    min-width: 110px;
    min-height: 44px;
    padding: 10px 16px;
    border: none;
    border-radius: 6px;
    font-size: 0.9em;
    font-weight: 500;
    cursor: pointer;
    touch-action: manipulation;
}
.btn-primary { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; }
.btn-secondary { background: #6c757d; color: white; }
.card { background: white; border-radius: 12px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); padding: 16px; margin: 8px 0; }
textarea {
    width: 100%;
    min-height: 90px;
    padding: 10px;
    border: 1px solid #ddd;
    border-radius: 6px;
    font-size: 1em;
    resize: vertical;
}
.history-item { border-bottom: 1px solid #eee; padding: 10px 4px; }
.history-item:active { background: #f0f0ff; }
.history-time { font-size: 0.75em; color: #999; margin-bottom: 4px; }
.history-content { word-break: break-all; white-space: pre-wrap; }
.empty { text-align: center; color: #999; padding: 24px 0; }
.status { text-align: center; font-size: 0.85em; color: #28a745; min-height: 1.2em; margin: 8px 0; }
"#;

const INDEX_SCRIPT: &str = r#"
function setStatus(text) {
    document.getElementById('status').textContent = text;
    if (text) {
        setTimeout(function () { setStatus(''); }, 3000);
    }
}

function renderHistory(items) {
    var list = document.getElementById('history');
    if (!items.length) {
        list.innerHTML = '<div class="empty">暂无历史记录</div>';
        return;
    }
    list.innerHTML = '';
    items.forEach(function (item) {
        var div = document.createElement('div');
        div.className = 'history-item';
        var time = document.createElement('div');
        time.className = 'history-time';
        time.textContent = item.timestamp;
        var content = document.createElement('div');
        content.className = 'history-content';
        content.textContent = item.content;
        div.appendChild(time);
        div.appendChild(content);
        div.addEventListener('click', function () {
            navigator.clipboard.writeText(item.content).then(function () {
                setStatus('已复制到手机剪贴板');
            });
        });
        list.appendChild(div);
    });
}

function loadHistory() {
    fetch('/api/history')
        .then(function (resp) { return resp.json(); })
        .then(renderHistory)
        .catch(function () { setStatus('获取历史记录失败'); });
}

function sendToComputer() {
    var text = document.getElementById('send-text').value;
    fetch('/api/set_clipboard', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ text: text })
    })
        .then(function (resp) { return resp.json(); })
        .then(function (data) {
            setStatus(data.message);
            if (data.success) {
                document.getElementById('send-text').value = '';
                loadHistory();
            }
        })
        .catch(function () { setStatus('发送失败'); });
}

document.getElementById('refresh-btn').addEventListener('click', loadHistory);
document.getElementById('send-btn').addEventListener('click', sendToComputer);
loadHistory();
"#;

/// 渲染手机端主页面，插入本机 IP、端口与完整访问地址
pub fn render_index_page(ip: &str, port: u16) -> String {
    let server_url = netinfo::server_url(ip, port);
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>剪贴板监控器 - 手机端</title>
<style>{style}</style>
</head>
<body>
<div class="container">
    <div class="header">
        <div class="logo">📋</div>
        <h1>剪贴板监控器</h1>
    </div>
    <div class="info-card">
        <div>服务器地址：{server_url}</div>
        <div class="info-grid">
            <div class="info-item">
                <div class="info-label">IP 地址</div>
                <div class="info-value">{ip}</div>
            </div>
            <div class="info-item">
                <div class="info-label">端口</div>
                <div class="info-value">{port}</div>
            </div>
        </div>
    </div>
    <div class="actions">
        <button id="refresh-btn" class="btn-primary">🔄 刷新历史</button>
        <button id="send-btn" class="btn-secondary">📤 发送到电脑</button>
    </div>
    <div class="card">
        <textarea id="send-text" placeholder="输入要发送到电脑剪贴板的文本"></textarea>
    </div>
    <div class="status" id="status"></div>
    <div class="card" id="history"><div class="empty">暂无历史记录</div></div>
</div>
<script>{script}</script>
</body>
</html>"#,
        style = INDEX_STYLE,
        script = INDEX_SCRIPT,
        server_url = server_url,
        ip = ip,
        port = port,
    )
}

/// 渲染手机界面兼容性测试页面
pub fn render_test_page() -> String {
    r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>手机界面兼容性测试</title>
<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f5f5f5; margin: 0; padding: 20px; }
.container { background: white; border-radius: 12px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); padding: 20px; }
.test-result { margin: 10px 0; padding: 10px; background: #d4edda; border-left: 4px solid #28a745; border-radius: 4px; }
</style>
</head>
<body>
<div class="container">
    <h1>📱 剪贴板监控器手机界面兼容性测试</h1>
    <div class="test-result">
        ✅ 支持320px-768px屏幕宽度<br>
        ✅ 触摸优化：按钮最小高度44px<br>
        ✅ 字体适配：根据不同屏幕调整大小<br>
        ✅ 平滑滚动：支持触摸滚动<br>
        <br>
        <a href="/" style="display: inline-block; padding: 10px 20px; background: #007bff; color: white; text-decoration: none; border-radius: 6px;">🏠 返回主界面</a>
    </div>
</div>
</body>
</html>"#
        .to_string()
}
