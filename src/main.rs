use api::App;
use core::{convert::Infallible, net::Ipv4Addr, time::Duration};
use db::{Config, Database, NoTls};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{env, sync::Arc};
use tokio::{net::TcpListener, runtime::Builder, task::JoinSet, time};

/// How long in-flight connections may linger after a shutdown signal.
const GRACE_PERIOD: Duration = Duration::from_secs(10);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let port: u16 = env::var("PORT")?.parse()?;
    let mut config = Config::new();
    config
        .host(&env::var("PG_HOSTNAME")?)
        .user(&env::var("PG_USERNAME")?)
        .password(env::var("PG_PASSWORD")?)
        .dbname(&env::var("PG_DATABASE")?);
    if let Ok(pg_port) = env::var("PG_PORT") {
        config.port(pg_port.parse()?);
    }

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(port, config))
}

async fn run(port: u16, config: Config) -> anyhow::Result<()> {
    // Connect to the store
    let (client, connection) = config.connect(NoTls).await?;
    let driver = tokio::spawn(async move {
        if let Err(err) = connection.await {
            log::error!("database connection closed: {err}");
        }
    });

    let db = Database::from(client);
    db.init_schema().await?;
    let app = Arc::new(App::from(db));

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
    log::info!("listening on {}", listener.local_addr()?);

    let mut stop = core::pin::pin!(tokio::signal::ctrl_c());
    let mut connections = JoinSet::new();
    loop {
        let (stream, addr) = tokio::select! {
            biased;
            signal = &mut stop => {
                signal?;
                break;
            }
            Some(_) = connections.join_next(), if !connections.is_empty() => continue,
            accepted = listener.accept() => match accepted {
                Ok(pair) => pair,
                Err(err) => {
                    log::error!("failed to accept connection: {err}");
                    continue;
                }
            },
        };

        let app = app.clone();
        let service = service_fn(move |req| {
            let app = app.clone();
            async move { Ok::<_, Infallible>(app.respond(req).await) }
        });
        connections.spawn(async move {
            if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
                log::warn!("connection with {addr} failed: {err}");
            }
        });
    }

    log::info!("shutting down with {} open connections", connections.len());
    let drain = async { while connections.join_next().await.is_some() {} };
    if time::timeout(GRACE_PERIOD, drain).await.is_err() {
        log::warn!("grace period elapsed; aborting remaining connections");
        connections.abort_all();
    }

    drop(app);
    driver.abort();
    Ok(())
}
