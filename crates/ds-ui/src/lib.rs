//! Askama templates for the Diskuss pages. Interpolated user text is
//! HTML-escaped by askama; there is no markup language.

use askama::Template;
use ds_core::models::{Board, Thread, ThreadSummary};
use ds_core::paging::PAGER_LINKS;

/// The board directory at `/`.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub boards: &'a [Board],
}

/// One page of a board's thread listing, with the fixed 1..=10 pager.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate<'a> {
    pub board: &'a Board,
    pub threads: &'a [ThreadSummary],
    pub page: usize,
}

impl BoardTemplate<'_> {
    /// The pager renders a fixed set of links regardless of thread count.
    pub fn pager(&self) -> std::ops::RangeInclusive<usize> {
        1..=PAGER_LINKS
    }
}

/// The new-thread form.
#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate<'a> {
    pub board: &'a Board,
}

/// A thread with its comments and the comment form.
#[derive(Template)]
#[template(path = "thread.html")]
pub struct ThreadTemplate<'a> {
    pub board: &'a Board,
    pub thread: &'a Thread,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::models::Comment;

    fn board() -> Board {
        Board {
            name: "abc".into(),
            description: "General".into(),
        }
    }

    #[test]
    fn home_lists_every_board() {
        let boards = [board()];
        let html = HomeTemplate { boards: &boards }.render().unwrap();
        assert!(html.contains("/abc/"));
        assert!(html.contains("General"));
    }

    #[test]
    fn board_page_escapes_user_text_and_marks_the_active_page() {
        let board = board();
        let threads = [ThreadSummary {
            id: 1,
            title: "<script>".into(),
            text: "body".into(),
            created_at: chrono::Utc::now(),
            comment_count: 2,
        }];
        let html = BoardTemplate {
            board: &board,
            threads: &threads,
            page: 2,
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("2 comments"));
        assert!(html.contains(r#"class="active""#));
    }

    #[test]
    fn thread_page_anchors_comments_by_id() {
        let board = board();
        let thread = Thread {
            id: 5,
            title: "Hello".into(),
            text: "World".into(),
            created_at: chrono::Utc::now(),
            comments: vec![Comment {
                id: 6,
                text: "reply".into(),
                created_at: chrono::Utc::now(),
            }],
        };
        let html = ThreadTemplate {
            board: &board,
            thread: &thread,
        }
        .render()
        .unwrap();
        assert!(html.contains(r##"id="c6""##));
        assert!(html.contains("reply"));
    }
}
