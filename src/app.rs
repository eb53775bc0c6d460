//! 3 つの bot 共通の起動処理

use std::ffi::OsString;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tokio::task::JoinError;

use crate::actions::{EventAction, EventLogger, QuoteReplier, Retweeter};
use crate::config::{BotConfig, BotKind};
use crate::quotes::MarkitClient;
use crate::server;
use crate::stream::{StreamError, StreamListener};
use crate::twitter::{OAuthSigner, StatusApi, TwitterClient};

#[derive(Parser, Debug)]
#[command(about = "Twitter streaming bot")]
pub struct Args {
    /// 中身のない HTTP サーバの待ち受けアドレス
    #[arg(long, default_value = ":8080")]
    pub listen: String,

    /// ストリームが切れたら N 秒後に繋ぎ直す。未指定なら終了する
    #[arg(long, value_name = "SECS")]
    pub reconnect_delay_secs: Option<u64>,

    /// Twitter REST / Markit 呼び出し 1 回あたりの上限
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl Args {
    /// `-listen :8080` のような 1 本ハイフンの書き方も受け付ける
    pub fn parse_compat<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(argv.into_iter().map(|a| single_dash_listen(a.into())))
    }
}

fn single_dash_listen(arg: OsString) -> OsString {
    match arg.to_str() {
        Some("-listen") => "--listen".into(),
        Some(s) if s.starts_with("-listen=") => format!("-{s}").into(),
        _ => arg,
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stream_bots=info".into()),
        )
        .init();
}

/// bin から呼ばれる入口
pub async fn run(kind: BotKind) -> Result<()> {
    init_tracing();
    let args = Args::parse_compat(std::env::args_os());
    run_with_args(kind, args).await
}

enum Exit {
    Stream(Result<Result<(), StreamError>, JoinError>),
    Server(Result<std::io::Result<()>, JoinError>),
    Signal,
}

pub async fn run_with_args(kind: BotKind, args: Args) -> Result<()> {
    let config = BotConfig::from_env(kind)?;
    tracing::info!(config = ?config.redacted(), "Starting {kind}");

    // ストリームは終わらないので全体のタイムアウトは付けない
    let http = reqwest::Client::builder().build().context("failed to build HTTP client")?;
    let signer = OAuthSigner::new(config.credentials.clone());
    let timeout = Duration::from_secs(args.request_timeout_secs);
    let action = build_action(&config, &http, &signer, timeout);

    let listener = StreamListener::new(
        http,
        signer,
        config.stream.clone(),
        config.screen_name.clone(),
        action,
    );
    let reconnect = args.reconnect_delay_secs.map(Duration::from_secs);

    let tcp = server::bind(&args.listen).await?;
    let local_addr = tcp.local_addr()?;
    tracing::info!(addr = %local_addr, "idle HTTP listener bound");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut stream_rx = shutdown_rx.clone();
    let mut stream_task =
        tokio::spawn(async move { listener.run_supervised(reconnect, &mut stream_rx).await });
    let mut server_task = tokio::spawn(server::serve_idle(tcp, shutdown_rx));

    let exit = tokio::select! {
        res = &mut stream_task => Exit::Stream(res),
        res = &mut server_task => Exit::Server(res),
        _ = interrupted(tokio::signal::ctrl_c()) => Exit::Signal,
    };

    let _ = shutdown_tx.send(true);

    match exit {
        Exit::Stream(res) => {
            let _ = server_task.await;
            res.context("stream task panicked")?.context("stream listener stopped")?;
        }
        Exit::Server(res) => {
            let _ = stream_task.await;
            res.context("idle HTTP listener panicked")?.context("failed to listen")?;
        }
        Exit::Signal => {
            tracing::info!("Ctrl-C received, shutting down");
            let _ = stream_task.await;
            let _ = server_task.await;
        }
    }

    tracing::info!("{kind} stopped");
    Ok(())
}

/// Ctrl-C を待つ。ハンドラを登録できなかった時は終了の合図にしない
async fn interrupted(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn build_action(
    config: &BotConfig,
    http: &reqwest::Client,
    signer: &OAuthSigner,
    timeout: Duration,
) -> Arc<dyn EventAction> {
    let twitter: Arc<dyn StatusApi> = Arc::new(
        TwitterClient::new(http.clone(), signer.clone(), &config.api_base).with_timeout(timeout),
    );

    match config.kind {
        BotKind::Echo => Arc::new(Retweeter::new(twitter)),
        BotKind::FitStats => Arc::new(EventLogger),
        BotKind::Stock => {
            let markit = MarkitClient::new(http.clone(), &config.markit_base).with_timeout(timeout);
            Arc::new(QuoteReplier::new(Arc::new(markit), twitter))
        }
    }
}
