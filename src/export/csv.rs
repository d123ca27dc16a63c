//! CSV serialization of posts and edges
//!
//! Output uses the source table schemas verbatim so it loads back through
//! the record store.

use crate::records::table::push_record;
use crate::records::{Edge, Post, EDGE_COLUMNS, POST_COLUMNS, TIMESTAMP_FORMAT};

/// Canonical boolean rendering
fn bool_cell(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Whole weights render without a decimal point
pub fn weight_cell(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e15 {
        format!("{}", weight as i64)
    } else {
        weight.to_string()
    }
}

/// Serialize posts, one row each, in iteration order
pub fn posts_to_csv<'a>(posts: impl IntoIterator<Item = &'a Post>) -> String {
    let mut out = String::new();
    push_record(&mut out, POST_COLUMNS);

    for p in posts {
        push_record(
            &mut out,
            [
                p.post_id.clone(),
                p.platform.clone(),
                p.category.clone(),
                p.content.clone(),
                p.username.clone(),
                p.user_id.clone(),
                p.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                p.misinfo_score.to_string(),
                p.shares.to_string(),
                p.likes.to_string(),
                p.comments.to_string(),
                p.status.clone(),
                bool_cell(p.archived).to_string(),
                p.archive_url.clone().unwrap_or_default(),
            ],
        );
    }
    out
}

/// Serialize edges, one row each, in iteration order
pub fn edges_to_csv<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> String {
    let mut out = String::new();
    push_record(&mut out, EDGE_COLUMNS);

    for e in edges {
        let weight = weight_cell(e.weight);
        push_record(&mut out, [e.source.as_str(), e.target.as_str(), weight.as_str()]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::post;

    #[test]
    fn test_posts_csv_layout() {
        let mut p = post("POST_0001", "Reddit", "Vaccines", 92);
        p.content = "Vaccines contain microchips, share now".to_string();
        p.archived = true;
        p.archive_url = Some("https://web.archive.org/1".to_string());

        let csv = posts_to_csv([&p]);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("post_id,platform,category,content,username,user_id,timestamp,misinfo_score,shares,likes,comments,status,archived,archive_url")
        );
        assert_eq!(
            lines.next(),
            Some("POST_0001,Reddit,Vaccines,\"Vaccines contain microchips, share now\",poster,user_1,2025-01-05 10:00:00,92,100,50,5,Debunked,True,https://web.archive.org/1")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_unarchived_post_has_empty_url() {
        let p = post("P1", "Reddit", "Vaccines", 80);
        let csv = posts_to_csv([&p]);
        assert!(csv.lines().nth(1).unwrap().ends_with(",Debunked,False,"));
    }

    #[test]
    fn test_edges_csv() {
        let edges = vec![
            Edge { source: "user_1".to_string(), target: "user_2".to_string(), weight: 3.0 },
            Edge { source: "user_2".to_string(), target: "user_3".to_string(), weight: 1.5 },
        ];
        assert_eq!(
            edges_to_csv(&edges),
            "source,target,weight\nuser_1,user_2,3\nuser_2,user_3,1.5\n"
        );
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(edges_to_csv(&Vec::<Edge>::new()), "source,target,weight\n");
        assert_eq!(posts_to_csv(&Vec::<Post>::new()).lines().count(), 1);
    }
}
