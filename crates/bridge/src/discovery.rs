//! Configuration-backed server discovery.

use async_trait::async_trait;

use crate::contracts::ServerDirectory;
use crate::error::Result;

/// Directory over a fixed, pre-established server list (from config).
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    servers: Vec<String>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new(servers: Vec<String>) -> Self {
        Self { servers }
    }
}

#[async_trait]
impl ServerDirectory for StaticDirectory {
    async fn servers(&self) -> Result<Vec<String>> {
        Ok(self.servers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_directory_preserves_order() {
        let dir = StaticDirectory::new(vec!["memory".into(), "weather".into(), "files".into()]);
        let servers = dir.servers().await.unwrap();
        assert_eq!(servers, vec!["memory", "weather", "files"]);
    }
}
