pub use self::{
    birdeye_history_price::{
        BirdeyeHistoryData, BirdeyeHistoryPrice, BirdeyePriceItem,
    },
    chain_ids::ChainIds,
    codex_token_info::{
        CodexError, CodexTokenInfo, CodexTokenInfoBody, CodexTokenInfoData,
    },
    tracked_token::TrackedToken,
};

mod birdeye_history_price;
mod chain_ids;
mod codex_token_info;
mod tracked_token;
