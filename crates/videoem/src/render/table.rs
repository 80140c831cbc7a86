use anyhow::Result;

use crate::error::VideoEmError;
use crate::render::card::VideoCard;
use crate::render::dom::{Element, ElementRef};

/// 将每张卡片包装为 tr > td，一次性追加到容器末尾，已有的行不会被移除或重排
pub fn append_cards(container: Option<&ElementRef>, cards: Vec<VideoCard>) -> Result<usize> {
    let container = container.ok_or_else(|| VideoEmError::MissingElement("feed container".to_owned()))?;
    let rows = cards
        .into_iter()
        .map(|card| Element::new("tr").with_child(Element::new("td").with_child(card.element)))
        .collect::<Vec<_>>();
    let count = rows.len();
    container.update(|table| table.append(rows));
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use videoem_model::{LinkMode, VideoRecord};

    use super::*;
    use crate::render::card::VideoCardBuilder;
    use crate::render::preview::PreviewBoard;

    fn cards(previews: &PreviewBoard) -> Vec<VideoCard> {
        let builder = VideoCardBuilder::new("", previews);
        ["a", "b"]
            .into_iter()
            .map(|slug| {
                let video = VideoRecord {
                    video_id: slug.to_owned(),
                    video_slug: slug.to_owned(),
                    title: None,
                    temp_link: None,
                    view_count: 0,
                    stars: 0,
                    username: String::new(),
                };
                builder.build(&video, &LinkMode::Watch).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_append_is_additive() {
        let previews = PreviewBoard::new(Duration::from_secs(5));
        let table = ElementRef::new(Element::new("table").with_id("videoTable"));
        let batch = cards(&previews);
        assert_eq!(append_cards(Some(&table), batch.clone()).unwrap(), 2);
        // 同一批数据渲染两次会得到两份，不做去重
        assert_eq!(append_cards(Some(&table), batch).unwrap(), 2);
        assert_eq!(table.len(), 4);
        let hrefs = table.read(|e| {
            let mut links = Vec::new();
            e.find_all(&|e| e.tag() == "a", &mut links);
            links.iter().filter_map(|a| a.attr("href").map(str::to_owned)).collect::<Vec<_>>()
        });
        assert_eq!(
            hrefs,
            vec!["/view_video/a/", "/view_video/b/", "/view_video/a/", "/view_video/b/"]
        );
        assert!(table.read(|e| e.children().all(|row| row.tag() == "tr")));
    }

    #[test]
    fn test_append_without_container() {
        let previews = PreviewBoard::new(Duration::from_secs(5));
        let err = append_cards(None, cards(&previews)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VideoEmError>(),
            Some(VideoEmError::MissingElement(_))
        ));
    }
}
