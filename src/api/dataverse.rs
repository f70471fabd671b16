use reqwest::header::{ACCEPT, CONTENT_TYPE, IF_MATCH};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::RelayError;
use crate::types::odata::ODataCollection;

const ODATA_VERSION_HEADER: &str = "OData-Version";
const ODATA_VERSION: &str = "4.0";

/// One relayed Dataverse collection: entity set name plus its fixed list
/// query. The dashboard supplies no filters of its own, so the query is
/// baked in per collection.
#[derive(Debug, Clone, Copy)]
pub struct EntitySet {
    pub collection: &'static str,
    pub order_by: &'static str,
    pub top: Option<u32>,
}

pub const STORM_INSPECTIONS: EntitySet = EntitySet {
    collection: "cr36d_storminspection2s",
    order_by: "cr36d_inspectionid desc",
    top: None,
};

pub const SERVICE_REQUESTS: EntitySet = EntitySet {
    collection: "cr36d_servicerequestrecords",
    order_by: "cr36d_objectid desc",
    top: Some(10),
};

pub const WORK_ORDERS: EntitySet = EntitySet {
    collection: "cr36d_workorders",
    order_by: "cr36d_workorderid desc",
    top: Some(10),
};

/// Stateless Dataverse Web API caller.
pub struct DataverseApi;

impl DataverseApi {
    /// GET the collection and return its `.value` array verbatim. Ordering
    /// is delegated to `$orderby`; the relay never re-sorts.
    pub async fn list(
        client: &reqwest::Client,
        base: &Url,
        token: &str,
        set: &EntitySet,
    ) -> Result<Vec<Value>, RelayError> {
        let mut url = collection_url(base, set.collection)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("$orderby", set.order_by);
            if let Some(top) = set.top {
                pairs.append_pair("$top", &top.to_string());
            }
        }

        let resp = client
            .get(url)
            .bearer_auth(token)
            .header(ODATA_VERSION_HEADER, ODATA_VERSION)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let resp = upstream_error_for_status(resp).await?;

        let body = resp.bytes().await?;
        let collection: ODataCollection = serde_json::from_slice(&body)?;
        debug!(
            collection = set.collection,
            records = collection.value.len(),
            "fetched Dataverse records"
        );
        Ok(collection.value)
    }

    /// PATCH one record, forwarding the caller's body unmodified.
    /// `If-Match: *` disables concurrency control: the update overwrites
    /// unconditionally, matching the dashboard's save semantics.
    pub async fn update(
        client: &reqwest::Client,
        base: &Url,
        token: &str,
        set: &EntitySet,
        id: &str,
        body: &Value,
    ) -> Result<(), RelayError> {
        let url = record_url(base, set.collection, id)?;

        let resp = client
            .patch(url)
            .bearer_auth(token)
            .header(ODATA_VERSION_HEADER, ODATA_VERSION)
            .header(CONTENT_TYPE, "application/json")
            .header(IF_MATCH, "*")
            .json(body)
            .send()
            .await?;
        upstream_error_for_status(resp).await?;
        Ok(())
    }
}

fn collection_url(base: &Url, collection: &str) -> Result<Url, RelayError> {
    Ok(base.join(&format!("api/data/v9.2/{collection}"))?)
}

fn record_url(base: &Url, collection: &str, id: &str) -> Result<Url, RelayError> {
    Ok(base.join(&format!("api/data/v9.2/{collection}({id})"))?)
}

/// Convert any non-2xx Dataverse response into an `Upstream` error carrying
/// the original status, content type, and body bytes.
async fn upstream_error_for_status(
    resp: reqwest::Response,
) -> Result<reqwest::Response, RelayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let content_type = resp.headers().get(CONTENT_TYPE).cloned();
    let body = resp.bytes().await?;
    Err(RelayError::Upstream {
        status,
        content_type,
        body,
    })
}
