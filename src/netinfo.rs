//! 本机网络信息模块
//!
//! 服务器页面与启动日志需要向用户展示手机可访问的局域网地址。

/// 获取本机局域网 IP
///
/// 获取失败时记录日志并回退为回环地址，保证页面始终能渲染出一个地址。
pub fn local_ip() -> String {
    match local_ip_address::local_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            log::error!("获取本地IP失败: {}", e);
            "127.0.0.1".to_string()
        }
    }
}

/// 拼接手机端访问地址
pub fn server_url(ip: &str, port: u16) -> String {
    format!("http://{}:{}", ip, port)
}

#[cfg(test)]
mod tests {
    use super::server_url;

    #[test]
    fn server_url_formats_ip_and_port() {
        assert_eq!(server_url("192.168.1.5", 9999), "http://192.168.1.5:9999");
    }
}
