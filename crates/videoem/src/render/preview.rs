use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;

use crate::error::VideoEmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(u64);

impl From<u64> for PreviewId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// 还没有被点击过
    Idle,
    /// 正在播放预览
    Previewing,
    /// 播放过预览，再次点击会跳转
    Previewed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 阻止跳转，开始播放预览
    Preview,
    /// 跳转到卡片链接
    Navigate(String),
}

struct PreviewSlot {
    href: String,
    has_played: bool,
    playing: bool,
}

impl PreviewSlot {
    fn state(&self) -> PreviewState {
        match (self.has_played, self.playing) {
            (false, _) => PreviewState::Idle,
            (true, true) => PreviewState::Previewing,
            (true, false) => PreviewState::Previewed,
        }
    }
}

#[derive(Default)]
struct Board {
    next_id: u64,
    slots: HashMap<PreviewId, PreviewSlot>,
}

/// 页面上所有视频卡片的预览状态，同一时刻最多只有一个预览在播放
#[derive(Clone)]
pub struct PreviewBoard {
    board: Arc<Mutex<Board>>,
    duration: Duration,
}

impl PreviewBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            board: Arc::default(),
            duration,
        }
    }

    pub fn register(&self, href: String) -> PreviewId {
        let mut board = self.board.lock();
        let id = PreviewId(board.next_id);
        board.next_id += 1;
        board.slots.insert(
            id,
            PreviewSlot {
                href,
                has_played: false,
                playing: false,
            },
        );
        id
    }

    pub fn state(&self, id: PreviewId) -> Option<PreviewState> {
        self.board.lock().slots.get(&id).map(PreviewSlot::state)
    }

    #[cfg(test)]
    pub fn playing(&self) -> Vec<PreviewId> {
        self.board
            .lock()
            .slots
            .iter()
            .filter(|(_, slot)| slot.playing)
            .map(|(id, _)| *id)
            .collect()
    }

    /// 处理卡片点击：第一次点击播放预览并暂停其它预览，之后的点击直接跳转
    ///
    /// 播放预览时会启动一个定时器，到时自动暂停，因此需要在 tokio 运行时中调用
    pub fn click(&self, id: PreviewId) -> Result<ClickOutcome> {
        {
            let mut board = self.board.lock();
            let slot = board
                .slots
                .get(&id)
                .ok_or_else(|| VideoEmError::MissingElement(format!("preview {id}")))?;
            if slot.has_played {
                return Ok(ClickOutcome::Navigate(slot.href.clone()));
            }
            for (other_id, other) in board.slots.iter_mut() {
                if *other_id == id {
                    other.playing = true;
                    other.has_played = true;
                } else {
                    other.playing = false;
                }
            }
        }
        debug!("preview {} started", id);
        let board = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(board.duration).await;
            board.pause(id);
        });
        Ok(ClickOutcome::Preview)
    }

    pub fn pause(&self, id: PreviewId) {
        if let Some(slot) = self.board.lock().slots.get_mut(&id) {
            slot.playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_single_preview_at_a_time() {
        let board = PreviewBoard::new(Duration::from_secs(60));
        let first = board.register("/view_video/first/".to_owned());
        let second = board.register("/view_video/second/".to_owned());
        assert_eq!(board.state(first), Some(PreviewState::Idle));

        assert_eq!(board.click(first).unwrap(), ClickOutcome::Preview);
        assert_eq!(board.playing(), vec![first]);
        assert_eq!(board.click(second).unwrap(), ClickOutcome::Preview);
        assert_eq!(board.playing(), vec![second]);
        assert_eq!(board.state(first), Some(PreviewState::Previewed));
        assert_eq!(board.state(second), Some(PreviewState::Previewing));

        // 已经预览过的卡片再次点击会跳转，不会重新播放
        assert_eq!(
            board.click(first).unwrap(),
            ClickOutcome::Navigate("/view_video/first/".to_owned())
        );
        assert_eq!(
            board.click(second).unwrap(),
            ClickOutcome::Navigate("/view_video/second/".to_owned())
        );
        assert_eq!(board.playing(), vec![second]);
    }

    #[tokio::test]
    async fn test_preview_auto_pause() {
        let board = PreviewBoard::new(Duration::from_millis(50));
        let id = board.register(String::new());
        board.click(id).unwrap();
        assert_eq!(board.state(id), Some(PreviewState::Previewing));
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(board.state(id), Some(PreviewState::Previewed));
        assert!(board.playing().is_empty());
    }

    #[test]
    fn test_click_unknown_preview() {
        let board = PreviewBoard::new(Duration::from_secs(5));
        let other = PreviewBoard::new(Duration::from_secs(5));
        other.register(String::new());
        let foreign = other.register(String::new());
        let err = board.click(foreign).unwrap_err();
        assert_eq!(
            err.downcast_ref::<VideoEmError>(),
            Some(&VideoEmError::MissingElement("preview 1".to_owned()))
        );
    }
}
