//! Trade catalog routes

use crate::api::response::DataResponse;
use crate::trades::{self, TradeInfo};

/// GET /api/v1/trades
///
/// List the registered trades with their estimation basis and defaults, for
/// populating job forms.
pub async fn list_trades() -> DataResponse<Vec<TradeInfo>> {
    DataResponse::new(trades::trade_catalog())
}
