// Event classification — partition raw post records into typed buckets.
//
// Every input record lands in exactly one of three buckets: original posts
// (no references), repost-like posts (one or more references to prior
// posts), or malformed records (a required core field could not be
// extracted). Nothing is dropped; completeness over strictness. Tag
// extraction failure is not an error — it degrades to an empty tag list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A post with no references to prior posts. One node-candidate in the
/// repost network, and the sole input to the hashtag network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginalPost {
    pub post_id: String,
    pub author_id: String,
    pub created_at: String,
    /// Tag texts as they appeared, in order. May contain repeats — a tag
    /// used twice in one post later surfaces as a self-loop event.
    pub tags: Vec<String>,
}

/// One reference carried by a repost-like post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Identifier of the referenced post.
    pub target_id: String,
    /// Reference kind (retweeted / replied_to / quoted). Carried for
    /// inspection; resolution does not branch on it.
    pub kind: Option<String>,
}

/// A post carrying one or more references to prior posts (repost, reply,
/// or quote). More than one reference at once ("multi-referencing") is a
/// valid, expected state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepostRecord {
    pub post_id: String,
    pub author_id: String,
    pub created_at: String,
    pub tags: Vec<String>,
    pub references: Vec<ReferenceEntry>,
}

/// Why a record landed in the malformed bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    NotAnObject,
    MissingPostId,
    MissingAuthorId,
    MissingCreatedAt,
    /// A reference list was present but an entry lacked a target id,
    /// or the list itself was not an array.
    BadReferenceList,
}

/// A record that failed core-field extraction. Carries whatever partial
/// fields were recoverable so the issue stays visible downstream instead
/// of the record silently vanishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalformedRecord {
    pub post_id: Option<String>,
    pub author_id: Option<String>,
    pub created_at: Option<String>,
    pub tags: Vec<String>,
    pub reason: MalformedReason,
}

/// One raw record after classification.
#[derive(Debug, Clone)]
pub enum ClassifiedRecord {
    Original(OriginalPost),
    Repost(RepostRecord),
    Malformed(MalformedRecord),
}

/// The three output buckets of a classification run.
///
/// Invariant: `originals.len() + reposts.len() + malformed.len()` equals
/// the number of input records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifiedBatch {
    pub originals: Vec<OriginalPost>,
    pub reposts: Vec<RepostRecord>,
    pub malformed: Vec<MalformedRecord>,
}

impl ClassifiedBatch {
    /// Total records across all three buckets.
    pub fn len(&self) -> usize {
        self.originals.len() + self.reposts.len() + self.malformed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of repost records carrying more than one reference.
    pub fn multi_reference_count(&self) -> usize {
        self.reposts.iter().filter(|r| r.references.len() > 1).count()
    }

    fn push(&mut self, record: ClassifiedRecord) {
        match record {
            ClassifiedRecord::Original(p) => self.originals.push(p),
            ClassifiedRecord::Repost(r) => self.reposts.push(r),
            ClassifiedRecord::Malformed(m) => self.malformed.push(m),
        }
    }
}

/// Classify a stream of raw records into the three buckets.
///
/// Pure and total: never fails for any single record, and every record
/// lands in exactly one bucket.
pub fn classify_records(records: impl IntoIterator<Item = Value>) -> ClassifiedBatch {
    let mut batch = ClassifiedBatch::default();
    for record in records {
        batch.push(classify_record(&record));
    }
    batch
}

/// Classify one raw record.
pub fn classify_record(record: &Value) -> ClassifiedRecord {
    if !record.is_object() {
        return ClassifiedRecord::Malformed(MalformedRecord {
            post_id: None,
            author_id: None,
            created_at: None,
            tags: Vec::new(),
            reason: MalformedReason::NotAnObject,
        });
    }

    // Tags degrade to empty on any shape problem; never an error.
    let tags = extract_tags(record);

    let post_id = scalar_field(record, "id");
    let author_id = scalar_field(record, "author_id");
    let created_at = scalar_field(record, "created_at");

    let malformed = |reason| {
        ClassifiedRecord::Malformed(MalformedRecord {
            post_id: post_id.clone(),
            author_id: author_id.clone(),
            created_at: created_at.clone(),
            tags: tags.clone(),
            reason,
        })
    };

    if post_id.is_none() {
        return malformed(MalformedReason::MissingPostId);
    }
    if author_id.is_none() {
        return malformed(MalformedReason::MissingAuthorId);
    }
    if created_at.is_none() {
        return malformed(MalformedReason::MissingCreatedAt);
    }

    let references = match extract_references(record) {
        Ok(refs) => refs,
        Err(()) => return malformed(MalformedReason::BadReferenceList),
    };

    let post_id = post_id.unwrap();
    let author_id = author_id.unwrap();
    let created_at = created_at.unwrap();

    if references.is_empty() {
        ClassifiedRecord::Original(OriginalPost {
            post_id,
            author_id,
            created_at,
            tags,
        })
    } else {
        ClassifiedRecord::Repost(RepostRecord {
            post_id,
            author_id,
            created_at,
            tags,
            references,
        })
    }
}

/// Read a scalar field as a string. Identifiers arrive as either JSON
/// strings or integers depending on the export tool; both normalize to
/// a string.
fn scalar_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract tag texts from `entities.hashtags[].tag`. Any missing or
/// malformed substructure yields an empty list.
fn extract_tags(record: &Value) -> Vec<String> {
    let Some(hashtags) = record
        .get("entities")
        .and_then(|e| e.get("hashtags"))
        .and_then(|h| h.as_array())
    else {
        return Vec::new();
    };

    hashtags
        .iter()
        .filter_map(|entry| entry.get("tag").and_then(|t| t.as_str()))
        .map(str::to_string)
        .collect()
}

/// Extract the reference list from `referenced_tweets[].{type,id}`.
///
/// An absent key is an empty list (original post). A present key that is
/// not an array, or an entry without a target id, is `Err` — the record
/// claims to reference something we cannot identify, so it goes to the
/// malformed bucket rather than being misread as an original.
fn extract_references(record: &Value) -> Result<Vec<ReferenceEntry>, ()> {
    let Some(raw) = record.get("referenced_tweets") else {
        return Ok(Vec::new());
    };
    if raw.is_null() {
        return Ok(Vec::new());
    }
    let Some(entries) = raw.as_array() else {
        return Err(());
    };

    let mut references = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(target_id) = scalar_field(entry, "id") else {
            return Err(());
        };
        let kind = entry
            .get("type")
            .and_then(|t| t.as_str())
            .map(str::to_string);
        references.push(ReferenceEntry { target_id, kind });
    }
    Ok(references)
}
