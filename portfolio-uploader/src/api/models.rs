//! Request and response models for the upload endpoint.

use serde::{Deserialize, Serialize};
use utoipa::{ToResponse, ToSchema};

/// Request structure for the upload portfolio endpoint.
///
/// Unknown fields are ignored so the endpoint stays compatible with
/// clients that send extra metadata alongside the payload.
#[derive(Clone, Default, Debug, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPortfolioRequestBody {
    /// Base64 encoded contents of the portfolio spreadsheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_data: Option<String>,
}

/// Response to a successful upload.
#[derive(Clone, Default, Debug, PartialEq, Hash, Serialize, Deserialize, ToSchema, ToResponse)]
pub struct UploadPortfolioResponse {
    /// Confirmation line describing the commit that landed.
    pub message: String,
}
