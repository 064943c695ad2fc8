pub use self::{
    http::HTTP,
    source::{MetadataSource, PriceSource},
};

mod http;
mod source;
