use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::Arc;
use tokio::net::TcpListener;

mod bundles;
mod config;
mod handler;
mod http;
mod logger;
mod rewrite;
mod routing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));

    logger::log_bundle_check(&state.bundles);
    logger::log_server_start(&addr, &cfg);

    run_server(listener, state).await
}

async fn run_server(
    listener: TcpListener,
    state: Arc<config::AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                if state.config.logging.access_log {
                    logger::log_connection_accepted(&peer_addr);
                }
                handle_connection(stream, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Handle a single connection in a spawned task.
///
/// Wraps the TCP stream in `TokioIo`, configures HTTP/1.1 keep-alive and
/// serves the connection under the configured read/write timeout. Request
/// handling reads only immutable bundle trees, so tasks need no coordination.
fn handle_connection(stream: tokio::net::TcpStream, state: Arc<config::AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive_timeout = state.config.performance.keep_alive_timeout;
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        if keep_alive_timeout > 0 {
            builder.keep_alive(true);
        }

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state_clone = Arc::clone(&state);
                async move { handler::handle_request(req, state_clone).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection timeout after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}

/// Create a `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR` enabled.
///
/// Lets a replacement process bind the address while the old one drains,
/// and tolerates sockets lingering in TIME_WAIT after a restart.
fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
