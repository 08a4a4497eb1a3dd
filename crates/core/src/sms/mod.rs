//! SMS module - outbound notification channel and the gateway client.

mod dreams_client;
mod sms_traits;

pub use dreams_client::DreamsSmsChannel;
pub use sms_traits::SmsChannelTrait;
