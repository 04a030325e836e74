// Starts a private relay per test. A relay pairs exactly two clients, so tests
// cannot share one.
use std::{
    net::SocketAddr,
    sync::{Arc, OnceLock},
    time::Duration,
};

// Spawn a relay on its own OS thread and runtime, and return its address once
// it accepts connections.
pub fn spawn_relay() -> SocketAddr {
    // Slot where the relay thread publishes the port the OS picked.
    let published = Arc::new(OnceLock::<SocketAddr>::new());
    let published_thread = Arc::clone(&published);

    // An OS thread keeps the relay alive independently of each `#[tokio::test]` runtime.
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("test runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral test port");
            let addr = listener.local_addr().expect("get local addr");
            let _ = published_thread.set(addr);
            relay_server::run(listener).await.expect("relay failed");
        });
    });

    wait_for_relay(published)
}

fn wait_for_relay(published: Arc<OnceLock<SocketAddr>>) -> SocketAddr {
    let addr = loop {
        if let Some(addr) = published.get() {
            break *addr;
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    for _ in 0..100 {
        // A readiness check connection is accepted and dropped; the relay forgets it again.
        if std::net::TcpStream::connect(addr).is_ok() {
            return addr;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("relay did not become ready in time");
}
