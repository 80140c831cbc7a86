use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::page::{Navigation, Page, PageContext};
use crate::render::Element;

static NON_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z]+").expect("invalid regex"));

/// 标签只允许小写字母
pub fn normalize_tag(raw: &str) -> String {
    NON_LETTERS.replace_all(&raw.to_lowercase(), "").into_owned()
}

/// 编辑页，目前只支持新建标签
pub struct EditVideoPage {
    ctx: PageContext,
}

impl EditVideoPage {
    pub fn layout() -> Vec<Element> {
        vec![
            Element::new("button").with_id("btn_add_tag").with_text("Add tag"),
            Element::new("dialog")
                .with_id("tagAddDialog")
                .with_child(Element::new("input").with_id("newTag").with_attr("type", "text"))
                .with_child(Element::new("button").with_id("btn_create_tag").with_text("Create")),
        ]
    }

    pub fn new(ctx: PageContext) -> Self {
        ctx.required("tagAddDialog");
        Self { ctx }
    }

    pub fn open_dialog(&self) -> Result<()> {
        self.ctx.element("tagAddDialog")?.update(|e| e.set_attr("open", ""));
        Ok(())
    }

    pub fn close_dialog(&self) -> Result<()> {
        self.ctx.element("tagAddDialog")?.update(|e| e.remove_attr("open"));
        Ok(())
    }

    pub fn is_dialog_open(&self) -> Result<bool> {
        Ok(self.ctx.element("tagAddDialog")?.read(|e| e.attr("open").is_some()))
    }

    /// 在对话框的输入框中填写标签
    pub fn type_tag(&self, raw: &str) -> Result<()> {
        self.ctx.element("tagAddDialog")?.update(|e| {
            if let Some(input) = e.find_mut(&|e| e.id() == Some("newTag")) {
                input.set_attr("value", raw);
            }
        });
        Ok(())
    }

    /// 读取对话框中的输入并创建标签，成功后需要刷新页面
    pub async fn add_tag(&self) -> Result<Navigation> {
        let raw = self.ctx.element("tagAddDialog")?.read(|e| {
            e.find(&|e| e.id() == Some("newTag"))
                .and_then(|input| input.attr("value"))
                .unwrap_or_default()
                .to_owned()
        });
        self.create_tag(&raw).await
    }

    pub async fn create_tag(&self, raw: &str) -> Result<Navigation> {
        let tag = normalize_tag(raw);
        if tag.is_empty() {
            warn!("Ignoring empty tag '{}'", raw);
            return Ok(Navigation::Stay);
        }
        self.ctx
            .client
            .create_tag(&tag)
            .await
            .inspect_err(|e| error!("Failed to create tag '{}': {:#}", tag, e))?;
        info!("Created tag '{}'", tag);
        Ok(Navigation::Reload)
    }
}

impl Page for EditVideoPage {
    fn context(&self) -> &PageContext {
        &self.ctx
    }

    async fn on_load(&self) -> Result<()> {
        Ok(())
    }
}
