use videoem_model::LinkMode;

/// 单个视频流的分页状态，每个视频流持有自己的一份
#[derive(Debug, Clone)]
pub struct PaginationState {
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub is_loading: bool,
    pub link_mode: LinkMode,
    /// 已经追加到容器中的卡片数量
    pub rendered: usize,
}

impl PaginationState {
    pub fn new(cursor: String, link_mode: LinkMode) -> Self {
        Self {
            next_cursor: Some(cursor),
            has_more: true,
            is_loading: false,
            link_mode,
            rendered: 0,
        }
    }

    /// 尝试占用加载标记，成功时返回需要请求的游标
    pub fn begin_load(&mut self) -> Option<String> {
        if self.is_loading || !self.has_more {
            return None;
        }
        let cursor = self.next_cursor.clone().filter(|c| !c.is_empty())?;
        self.is_loading = true;
        Some(cursor)
    }
}
