//! Aggregation of a streamed synthesis response into one audio payload

use futures::{pin_mut, Stream, StreamExt};
use tracing::debug;

use crate::error::{Error, Result};

/// One incremental unit of a streamed synthesis response.
///
/// Stream events do not always carry audio: interstitial events (metadata,
/// text parts) surface as `Empty` and are skipped by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioChunk {
    Inline {
        /// Decoded payload bytes
        data: Vec<u8>,
        /// Format label, e.g. `audio/L16; rate=24000`
        mime_type: Option<String>,
    },
    Empty,
}

/// The assembled payload of one synthesis response.
///
/// Payload bytes accumulate in arrival order; the format label is taken
/// from the first chunk that carried one and is authoritative for the
/// whole stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedAudio {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

/// Drain a chunk stream into a single [`AggregatedAudio`].
///
/// Chunk order is load-bearing: PCM bytes are positionally meaningful and
/// are concatenated exactly as delivered. A stream that terminates without
/// any payload bytes is an error, not an empty result. Any error item is
/// fatal; a partially-consumed stream cannot be resumed.
pub async fn aggregate<S>(chunks: S) -> Result<AggregatedAudio>
where
    S: Stream<Item = Result<AudioChunk>>,
{
    pin_mut!(chunks);

    let mut audio = AggregatedAudio::default();
    while let Some(chunk) = chunks.next().await {
        match chunk? {
            AudioChunk::Inline { data, mime_type } => {
                if audio.mime_type.is_none() {
                    audio.mime_type = mime_type;
                }
                audio.data.extend_from_slice(&data);
            }
            AudioChunk::Empty => {}
        }
    }

    if audio.data.is_empty() {
        return Err(Error::EmptyStream);
    }

    debug!(
        bytes = audio.data.len(),
        mime_type = audio.mime_type.as_deref().unwrap_or("<none>"),
        "aggregated synthesis stream"
    );
    Ok(audio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn inline(data: &[u8], mime_type: Option<&str>) -> Result<AudioChunk> {
        Ok(AudioChunk::Inline {
            data: data.to_vec(),
            mime_type: mime_type.map(String::from),
        })
    }

    #[tokio::test]
    async fn concatenates_in_arrival_order() {
        let chunks = stream::iter(vec![inline(b"AAAA", None), inline(b"BBBB", None)]);
        let audio = aggregate(chunks).await.unwrap();
        assert_eq!(audio.data, b"AAAABBBB");

        let reversed = stream::iter(vec![inline(b"BBBB", None), inline(b"AAAA", None)]);
        let audio = aggregate(reversed).await.unwrap();
        assert_eq!(audio.data, b"BBBBAAAA");
    }

    #[tokio::test]
    async fn first_label_is_authoritative() {
        let chunks = stream::iter(vec![
            inline(b"a", Some("audio/L16; rate=24000")),
            inline(b"b", Some("audio/mpeg")),
        ]);
        let audio = aggregate(chunks).await.unwrap();
        assert_eq!(audio.mime_type.as_deref(), Some("audio/L16; rate=24000"));
    }

    #[tokio::test]
    async fn label_taken_from_first_chunk_that_carries_one() {
        let chunks = stream::iter(vec![
            inline(b"a", None),
            inline(b"b", Some("audio/L16; rate=24000")),
        ]);
        let audio = aggregate(chunks).await.unwrap();
        assert_eq!(audio.mime_type.as_deref(), Some("audio/L16; rate=24000"));
    }

    #[tokio::test]
    async fn empty_chunks_are_skipped() {
        let chunks = stream::iter(vec![
            Ok(AudioChunk::Empty),
            inline(b"data", Some("audio/mpeg")),
            Ok(AudioChunk::Empty),
        ]);
        let audio = aggregate(chunks).await.unwrap();
        assert_eq!(audio.data, b"data");
        assert_eq!(audio.mime_type.as_deref(), Some("audio/mpeg"));
    }

    #[tokio::test]
    async fn zero_chunk_stream_is_an_error() {
        let chunks = stream::iter(Vec::<Result<AudioChunk>>::new());
        assert!(matches!(aggregate(chunks).await, Err(Error::EmptyStream)));
    }

    #[tokio::test]
    async fn stream_of_only_empty_chunks_is_an_error() {
        let chunks = stream::iter(vec![Ok(AudioChunk::Empty), Ok(AudioChunk::Empty)]);
        assert!(matches!(aggregate(chunks).await, Err(Error::EmptyStream)));
    }

    #[tokio::test]
    async fn mid_stream_error_is_fatal() {
        let chunks = stream::iter(vec![
            inline(b"partial", None),
            Err(Error::Generation("stream interrupted".into())),
        ]);
        assert!(matches!(aggregate(chunks).await, Err(Error::Generation(_))));
    }
}
