//! 服务端接口返回的数据结构，客户端只读不写

mod feed;
mod subscription;
mod tag;
mod user;
mod video;

pub use feed::FeedPage;
pub use subscription::{Subscription, SubscriptionList};
pub use tag::Tag;
pub use user::{InvoiceLink, UserProfile, WebAppUser};
pub use video::{LinkMode, VideoCounter, VideoRecord};
