use serde::{Deserialize, Serialize};

/// 订阅关系，两端都是用户的 telegram_id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub from_user: i64,
    pub to_user: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionList {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl SubscriptionList {
    pub fn targets(&self) -> impl Iterator<Item = i64> + '_ {
        self.subscriptions.iter().map(|s| s.to_user)
    }

    pub fn is_subscribed_to(&self, user: i64) -> bool {
        self.targets().any(|to_user| to_user == user)
    }
}
