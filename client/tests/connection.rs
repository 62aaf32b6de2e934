use sa_client::{Client, ClientError};

#[tokio::test]
async fn closed_port_is_a_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Client::connect(&addr.to_string()).await.unwrap_err();
    assert!(matches!(err, ClientError::Connection(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_address_is_rejected() {
    let err = Client::connect("not a host").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidAddress(_)), "{err:?}");
}
