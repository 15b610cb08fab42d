use once_cell::sync::Lazy;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Spawns onto the current runtime when there is one, otherwise onto [`RUNTIME`].
pub fn spawn_async<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(fut);
        }
        Err(_) => {
            RUNTIME.spawn(fut);
        }
    }
}

/// Runs `fut` in the background and hands its output back through a
/// single-assignment channel.
pub fn spawn_with_reply<T, Fut>(fut: Fut) -> oneshot::Receiver<T>
where
    T: Send + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    spawn_async(async move {
        let res = fut.await;
        let _ = tx.send(res);
    });
    rx
}

pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme_and_strips_slash() {
        assert_eq!(normalize_url(" chat.example.com/ "), "https://chat.example.com");
        assert_eq!(normalize_url("http://localhost:3000/"), "http://localhost:3000");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn reply_arrives_outside_a_runtime() {
        let rx = spawn_with_reply(async { 41 + 1 });
        assert_eq!(RUNTIME.block_on(rx).unwrap(), 42);
    }

    #[tokio::test]
    async fn reply_arrives_inside_a_runtime() {
        let rx = spawn_with_reply(async { "done" });
        assert_eq!(rx.await.unwrap(), "done");
    }
}
