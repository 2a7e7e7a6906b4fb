//! Reply threading.
//!
//! Annotates each reply with how many other replies in the same topic
//! mention its author. Matching is an exact string comparison between a
//! reply's `reply_to` and another reply's `author`.
//!
//! The computation is a pairwise O(n²) scan. A topic page holds at most a
//! few hundred replies, so an index is not worth the extra state.

use crate::domain::Reply;

/// Recomputes `reply_count` for every reply from scratch.
pub fn thread_replies(replies: &mut [Reply]) {
    let counts: Vec<usize> = replies
        .iter()
        .map(|target| {
            replies
                .iter()
                .filter(|r| r.reply_to.as_deref() == Some(target.author.as_str()))
                .count()
        })
        .collect();

    for (reply, count) in replies.iter_mut().zip(counts) {
        reply.reply_count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(author: &str, reply_to: Option<&str>) -> Reply {
        Reply {
            author: author.to_string(),
            reply_to: reply_to.map(String::from),
            ..Reply::default()
        }
    }

    #[test]
    fn test_empty_thread() {
        let mut replies: Vec<Reply> = Vec::new();
        thread_replies(&mut replies);
        assert!(replies.is_empty());
    }

    #[test]
    fn test_simple_counts() {
        let mut replies = vec![
            reply("alice", None),
            reply("bob", Some("alice")),
            reply("carol", Some("alice")),
            reply("alice", Some("bob")),
        ];
        thread_replies(&mut replies);

        let counts: Vec<usize> = replies.iter().map(|r| r.reply_count).collect();
        // Both of alice's replies see the two mentions of "alice".
        assert_eq!(counts, vec![2, 1, 0, 2]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let mut replies = vec![reply("Alice", None), reply("bob", Some("alice"))];
        thread_replies(&mut replies);
        assert_eq!(replies[0].reply_count, 0);
    }

    #[test]
    fn test_mention_of_absent_author_counts_nothing() {
        let mut replies = vec![reply("alice", Some("ghost")), reply("bob", Some("ghost"))];
        thread_replies(&mut replies);
        assert!(replies.iter().all(|r| r.reply_count == 0));
    }

    #[test]
    fn test_recompute_replaces_previous_counts() {
        let mut replies = vec![reply("alice", None)];
        replies[0].reply_count = 42;
        thread_replies(&mut replies);
        assert_eq!(replies[0].reply_count, 0);
    }

    #[test]
    fn test_large_synthetic_thread() {
        // 60 replies by 6 authors. Reply i mentions author (i + 1) % 6 unless
        // i is a multiple of 5, which carries no mention.
        let authors = ["u0", "u1", "u2", "u3", "u4", "u5"];
        let mut replies: Vec<Reply> = (0..60)
            .map(|i| {
                let mention = (i % 5 != 0).then(|| authors[(i + 1) % 6]);
                reply(authors[i % 6], mention)
            })
            .collect();

        let mut expected_by_author = [0usize; 6];
        for i in 0..60 {
            if i % 5 != 0 {
                expected_by_author[(i + 1) % 6] += 1;
            }
        }

        thread_replies(&mut replies);

        for (i, r) in replies.iter().enumerate() {
            assert_eq!(r.reply_count, expected_by_author[i % 6], "reply {}", i);
        }
        let total_mentions: usize = expected_by_author.iter().sum();
        assert_eq!(total_mentions, 48);
    }
}
