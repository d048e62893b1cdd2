// Hashtag pair expansion — tags co-occurring in a post become events.
//
// A tag is linked to another when both appear in the same original post.
// A post with n tags contributes n(n-1)/2 unordered pair events; posts
// with zero or one tag contribute nothing — tags used alone are excluded
// from the network by design. The events feed the same aggregator as the
// repost network, with tag strings as endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::classify::OriginalPost;

/// Expand each qualifying post's tag list into unordered pair events.
///
/// The tag list is a list, not a set: a tag repeated within one post
/// yields a pair with identical endpoints, which the aggregator tallies
/// as a self-loop and suppresses.
pub fn tag_pair_events(originals: &[OriginalPost]) -> Vec<(String, String)> {
    let mut events = Vec::new();
    for post in originals {
        let tags = &post.tags;
        if tags.len() < 2 {
            continue;
        }
        for i in 0..tags.len() {
            for j in (i + 1)..tags.len() {
                events.push((tags[i].clone(), tags[j].clone()));
            }
        }
    }
    events
}

/// Tag usage statistics over the original-post bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagUsage {
    pub posts_without_tags: usize,
    pub posts_with_one_tag: usize,
    pub posts_with_multiple_tags: usize,
    /// Per-tag occurrence counts, sorted descending (ties by tag text).
    pub tag_counts: Vec<(String, u64)>,
    /// Tags that appear exactly once across all posts.
    pub used_once: usize,
}

impl TagUsage {
    pub fn unique_tags(&self) -> usize {
        self.tag_counts.len()
    }
}

/// Compute tag usage statistics. Counts every tag occurrence, including
/// posts with a single tag (those posts are outside the network but still
/// part of the usage distribution).
pub fn tag_usage(originals: &[OriginalPost]) -> TagUsage {
    let mut usage = TagUsage::default();
    let mut counts: HashMap<&str, u64> = HashMap::new();

    for post in originals {
        match post.tags.len() {
            0 => usage.posts_without_tags += 1,
            1 => usage.posts_with_one_tag += 1,
            _ => usage.posts_with_multiple_tags += 1,
        }
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    usage.used_once = counts.values().filter(|&&c| c == 1).count();
    usage.tag_counts = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    usage
        .tag_counts
        .sort_by(|x, y| y.1.cmp(&x.1).then_with(|| x.0.cmp(&y.0)));

    usage
}
