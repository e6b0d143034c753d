use httpmock::MockServer;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn start_server() -> MockServer {
    init_logger();
    MockServer::start()
}
