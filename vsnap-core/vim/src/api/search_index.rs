//! SearchIndex API

use reqwest::Method;
use tracing::info;

use crate::client::VimClient;
use crate::error::Result;
use crate::models::{FindByUuidRequest, ManagedObjectReference};

/// SearchIndex API
pub struct SearchIndexApi<'a> {
    client: &'a VimClient,
}

impl<'a> SearchIndexApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 按 UUID 查找虚拟机
    ///
    /// # Arguments
    /// * `uuid` - 虚拟机 UUID
    /// * `instance_uuid` - true 按 instance UUID 查找，否则按 BIOS UUID 查找
    ///
    /// 找不到时返回 `None`。
    pub async fn find_by_uuid(
        &self,
        uuid: &str,
        instance_uuid: bool,
    ) -> Result<Option<ManagedObjectReference>> {
        info!("按 UUID 查找虚拟机: {} (instance={})", uuid, instance_uuid);
        let search_index = self.client.search_index_ref().await?;
        self.client.request(
            Method::POST,
            &format!("/SearchIndex/{}/FindByUuid", search_index.value),
            Some(FindByUuidRequest {
                uuid: uuid.to_string(),
                vm_search: true,
                instance_uuid,
            }),
        ).await
    }
}
