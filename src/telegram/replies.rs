//! User-facing reply texts.

use indoc::formatdoc;

use crate::ingest::Ingested;

/// Generic reply for any failed photo, whatever step broke.
pub const PROCESSING_FAILED: &str = "Произошла ошибка. Попробуй еще раз.";

/// Reply once the last photo of a batch has been linked.
pub const BATCH_COMPLETE: &str = "Все фото загружены.";

/// Usage text for /start
pub fn start_text(max_batch: u32, spreadsheet_link: &str) -> String {
    formatdoc!(
        "
        Привет! Отправь мне до {max_batch} фото, и я распределю их по таблице: нечетные — в столбец C, четные — в столбец D.

        Таблица: {link}",
        max_batch = max_batch,
        link = spreadsheet_link,
    )
}

/// Reply for one ingested photo; the last photo of a batch gets the batch message instead.
pub fn photo_reply(ingested: &Ingested, max_batch: u32) -> String {
    if ingested.batch_complete() {
        BATCH_COMPLETE.to_string()
    } else {
        format!(
            "Фото {}/{} сохранено в ячейку {}.",
            ingested.position, max_batch, ingested.cell
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{Advance, Column, TargetCell};

    fn ingested(position: u32, advance: Advance) -> Ingested {
        Ingested {
            position,
            cell: TargetCell {
                column: Column::for_position(position),
                row: 2,
            },
            url: "https://drive.google.com/uc?export=view&id=x".to_string(),
            advance,
        }
    }

    #[test]
    fn test_start_text_mentions_limit_and_link() {
        let text = start_text(21, "https://docs.google.com/spreadsheets/d/abc");
        assert!(text.starts_with("Привет! Отправь мне до 21 фото"));
        assert!(text.contains("столбец C"));
        assert!(text.ends_with("Таблица: https://docs.google.com/spreadsheets/d/abc"));
    }

    #[test]
    fn test_photo_reply() {
        assert_eq!(
            photo_reply(&ingested(2, Advance::Continue), 21),
            "Фото 2/21 сохранено в ячейку D2."
        );
        assert_eq!(photo_reply(&ingested(21, Advance::BatchComplete), 21), BATCH_COMPLETE);
    }
}
