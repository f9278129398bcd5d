use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect};
use subrecon_common::error::ProbeFailure;

use super::Prober;

/// Plain-HTTP liveness probe.
///
/// Redirects are followed up to a limit. When the limit is hit the redirect
/// response itself is returned instead of an error, so a long chain still
/// proves the host answers.
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(timeout: Duration, max_redirects: usize, user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(redirect_policy(max_redirects))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

fn redirect_policy(max_redirects: usize) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, hostname: &str) -> Result<u16, ProbeFailure> {
        let url = format!("http://{hostname}/");

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) if e.is_timeout() => Err(ProbeFailure::TimedOut(hostname.to_string())),
            Err(e) if e.is_connect() => Err(ProbeFailure::Connect {
                hostname: hostname.to_string(),
                reason: e.to_string(),
            }),
            Err(e) => Err(ProbeFailure::Request {
                hostname: hostname.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `response` to every connection on a loopback port.
    async fn serve(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = stream.read(&mut buf).await;
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        addr.to_string()
    }

    fn prober(max_redirects: usize) -> HttpProber {
        HttpProber::new(Duration::from_millis(500), max_redirects, "subrecon-test").unwrap()
    }

    #[tokio::test]
    async fn probe_reports_not_found() {
        let host = serve("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        assert_eq!(prober(5).probe(&host).await, Ok(404));
    }

    #[tokio::test]
    async fn probe_reports_server_errors() {
        let host = serve("HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        assert_eq!(prober(5).probe(&host).await, Ok(503));
    }

    #[tokio::test]
    async fn probe_keeps_redirect_when_limit_is_reached() {
        let host = serve("HTTP/1.1 302 Found\r\nLocation: /next\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        assert_eq!(prober(2).probe(&host).await, Ok(302));
    }

    #[tokio::test]
    async fn probe_times_out_on_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let host = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let result = prober(5).probe(&host).await;
        assert!(matches!(result, Err(ProbeFailure::TimedOut(_))));
    }

    #[tokio::test]
    async fn probe_fails_on_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let host = listener.local_addr().unwrap().to_string();
        drop(listener);

        assert!(prober(5).probe(&host).await.is_err());
    }
}
