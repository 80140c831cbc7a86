use parking_lot::Mutex;
use videoem_model::WebAppUser;

/// 宿主聊天平台提供的 WebApp 能力
pub trait WebApp: Send + Sync {
    /// 对应 initDataUnsafe.user，宿主没有注入时为 None
    fn user(&self) -> Option<&WebAppUser>;

    /// 交给宿主打开支付链接
    fn open_invoice(&self, link: &str);
}

/// 用固定的用户信息模拟宿主，打开过的支付链接会被记录下来
#[derive(Default)]
pub struct StaticWebApp {
    user: Option<WebAppUser>,
    invoices: Mutex<Vec<String>>,
}

impl StaticWebApp {
    pub fn new(user: Option<WebAppUser>) -> Self {
        Self {
            user,
            invoices: Mutex::default(),
        }
    }

    #[cfg(test)]
    pub fn opened_invoices(&self) -> Vec<String> {
        self.invoices.lock().clone()
    }
}

impl WebApp for StaticWebApp {
    fn user(&self) -> Option<&WebAppUser> {
        self.user.as_ref()
    }

    fn open_invoice(&self, link: &str) {
        info!("opening invoice {}", link);
        self.invoices.lock().push(link.to_owned());
    }
}
