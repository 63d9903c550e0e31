pub mod request;
pub mod response;

pub use request::{
    GetEntityParams, GetRelationshipsParams, IndexFilesParams, InsertTextParams, JsonRpcRequest,
    RpcId, SearchCodeParams, VisualizeSubgraphParams,
};
pub use response::{JsonRpcError, JsonRpcResponse};
