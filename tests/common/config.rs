//! Config builders pointing at a mock server

use std::time::Duration;

use jobfetch::Config;

/// Config for `base_url` with the given timeout and concurrency
pub fn test_config(base_url: impl Into<String>, timeout: Duration, concurrency: usize) -> Config {
    Config {
        timeout,
        concurrency,
        ..Config::new(base_url)
    }
}

/// A loopback URL with nothing listening on it
pub fn unreachable_base_url() -> String {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    format!("http://127.0.0.1:{}", port)
}
