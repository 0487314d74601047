use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::r#trait::TaskSource;
use crate::config::BackendConfig;
use crate::error::http::preview_body;
use crate::error::{TaskClientError, TaskHttpError};
use crate::task::{convert_tasks, RawTask, Task};

pub const TASKS_PATH: &str = "/tasks";

/// Subtasks nest without bound, so serde_json's recursion limit is lifted
/// and the stack grows on demand while decoding.
fn decode_unbounded<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(body);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

async fn read_task_list(resp: reqwest::Response) -> Result<Vec<RawTask>, TaskHttpError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| TaskHttpError::from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        return Err(TaskHttpError::Status {
            url,
            status: status.as_u16(),
            preview: preview_body(&body),
        });
    }

    decode_unbounded(&body).map_err(|err| TaskHttpError::decode(status.as_u16(), url, &body, err))
}

/// Reads the task list from the backend. Holds no state besides the
/// connection pool, so clones are cheap and calls are independent.
#[derive(Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    url_tasks: String,
}

impl TaskClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, TaskClientError> {
        let mut builder = reqwest::Client::builder();
        // 0 means wait as long as the transport allows
        if timeout_ms > 0 {
            builder = builder.timeout(std::time::Duration::from_millis(timeout_ms));
        }
        let http = builder.build().map_err(TaskClientError::Build)?;
        let normalized = base_url.trim().trim_end_matches('/');
        Ok(Self {
            http,
            url_tasks: format!("{}{}", normalized, TASKS_PATH),
        })
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, TaskClientError> {
        Self::new(&cfg.resolved_base_url(), cfg.timeout_ms)
    }

    pub fn tasks_url(&self) -> &str {
        &self.url_tasks
    }

    /// One GET of the task list, decoded and converted in full. Any failure
    /// along the way discards the whole response.
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>, TaskClientError> {
        let url = &self.url_tasks;
        tracing::debug!(
            target: "tasks.client",
            stage = "tasks.http.fetch.in",
            url = %url
        );
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| TaskHttpError::from_reqwest(err, url.clone()))?;
        let status = resp.status();
        let raw = read_task_list(resp).await?;
        let tasks = convert_tasks(raw)?;
        tracing::debug!(
            target: "tasks.client",
            stage = "tasks.http.fetch.out",
            status = %status,
            tasks = tasks.len(),
            total = tasks.iter().map(Task::total_count).sum::<usize>()
        );
        Ok(tasks)
    }
}

#[async_trait]
impl TaskSource for TaskClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, TaskClientError> {
        TaskClient::fetch_tasks(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::task::Priority;
    use chrono::{TimeZone, Utc};
    use mockito::Server;
    use pretty_assertions::assert_eq;

    const NESTED_BODY: &str = r#"[
        {"title":"Parent","priority":"Low","due":null,"sub":[
            {"title":"Child","priority":"Urgent","due":"2024-01-01T00:00:00Z","sub":[],
             "done":true,"done_at":"2024-01-02T00:00:00Z"}
        ],"done":false,"done_at":null},
        {"title":"Second","priority":"Medium","due":null,"sub":[],"done":false,"done_at":null}
    ]"#;

    #[test]
    fn test_tasks_url_normalized() {
        let client = TaskClient::new("http://localhost:4000/", 1_000).unwrap();
        assert_eq!(client.tasks_url(), "http://localhost:4000/tasks");

        let client = TaskClient::from_config(&BackendConfig::default()).unwrap();
        assert_eq!(client.tasks_url(), "http://localhost:4000/tasks");
    }

    #[tokio::test]
    async fn test_fetch_tasks_converts_nested_payload() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(NESTED_BODY)
            .expect(1)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 1_000).unwrap();
        let tasks = client.fetch_tasks().await.unwrap();
        m.assert_async().await;

        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Parent", "Second"]);

        let child = &tasks[0].sub[0];
        assert_eq!(child.priority, Priority::Urgent);
        assert_eq!(child.due, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(
            child.done_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_fetch_tasks_empty_list() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 1_000).unwrap();
        assert!(client.fetch_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_tasks_malformed_json() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(r#"[{"title":"A","#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 1_000).unwrap();
        let err = client.fetch_tasks().await.unwrap_err();
        match err {
            TaskClientError::Http(http @ TaskHttpError::Decode { .. }) => {
                assert_eq!(http.status(), Some(200));
                assert!(!http.is_transport());
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_tasks_shape_mismatch() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(r#"[{"title":"A","priority":"Low","due":null,"sub":[],"done":"no","done_at":null}]"#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 1_000).unwrap();
        let err = client.fetch_tasks().await.unwrap_err();
        assert!(matches!(
            err,
            TaskClientError::Http(TaskHttpError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_tasks_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 1_000).unwrap();
        let err = client.fetch_tasks().await.unwrap_err();
        let TaskClientError::Http(http) = err else {
            panic!("expected http error");
        };
        assert!(matches!(http, TaskHttpError::Status { status: 500, .. }));
        assert_eq!(http.status(), Some(500));
        assert!(http.url().ends_with("/tasks"));
        assert!(http.to_string().contains("internal error"));
    }

    #[tokio::test]
    async fn test_fetch_tasks_invalid_timestamp() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(r#"[{"title":"A","priority":"High","due":"someday","sub":[],"done":false,"done_at":null}]"#)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 1_000).unwrap();
        let err = client.fetch_tasks().await.unwrap_err();
        assert!(matches!(
            err,
            TaskClientError::Convert(ConvertError::InvalidTimestamp { field: "due", .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_tasks_connection_refused() {
        // bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = TaskClient::new(&format!("http://127.0.0.1:{port}"), 1_000).unwrap();
        let err = client.fetch_tasks().await.unwrap_err();
        let TaskClientError::Http(http) = err else {
            panic!("expected http error");
        };
        assert!(matches!(http, TaskHttpError::Connect { .. }));
        assert!(http.is_transport());
    }

    #[tokio::test]
    async fn test_each_call_issues_a_request() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 1_000).unwrap();
        client.fetch_tasks().await.unwrap();
        client.fetch_tasks().await.unwrap();
        m.assert_async().await;
    }

    fn nested_chain(levels: usize) -> String {
        let mut body = String::new();
        for i in 0..levels {
            body.push_str(&format!(
                r#"{{"title":"level-{i}","priority":"Medium","due":null,"done":false,"done_at":null,"sub":["#
            ));
        }
        for _ in 0..levels {
            body.push_str("]}");
        }
        format!("[{body}]")
    }

    #[tokio::test]
    async fn test_fetch_tasks_deeply_nested_payload() {
        const LEVELS: usize = 300;
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(nested_chain(LEVELS))
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 5_000).unwrap();
        let tasks = client.fetch_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].depth(), LEVELS);
        assert_eq!(tasks[0].total_count(), LEVELS);

        let (depth, deepest) = tasks[0].walk().last().unwrap();
        assert_eq!(depth, LEVELS - 1);
        assert_eq!(deepest.title, format!("level-{}", LEVELS - 1));
    }

    #[tokio::test]
    async fn test_zero_timeout_means_no_timeout() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_body(NESTED_BODY)
            .create_async()
            .await;

        let client = TaskClient::new(&server.url(), 0).unwrap();
        let tasks = client.fetch_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
    }
}
