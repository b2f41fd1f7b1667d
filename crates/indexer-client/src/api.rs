use async_trait::async_trait;

use crate::types::{Query, QueryResponse, ResponseData};
use crate::{Error, Result};

/// Operations of the indexing service.
#[async_trait]
pub trait IndexerApi: Send + Sync {
    /// Returns the height of the chain as seen by the indexer.
    async fn get_height(&self) -> Result<u64>;

    /// Executes a query and returns a single page of the results.
    async fn get(&self, query: &Query) -> Result<QueryResponse>;

    /// Executes a query and follows the `next_block` cursor until the whole range is collected.
    ///
    /// The range ends at `query.to_block`, or at the archive height when the query is open-ended
    /// or reaches past the tip.
    async fn collect(&self, query: &Query) -> Result<ResponseData> {
        let mut query = query.clone();
        let mut collected = ResponseData::default();

        loop {
            let response = self.get(&query).await?;

            for data in response.data {
                collected.extend(data);
            }

            let Some(end) = query.to_block.or(response.archive_height) else {
                break;
            };

            if response.next_block >= end {
                break;
            }

            // The cursor moved past the tip, the rest of the range is not indexed yet.
            if matches!(response.archive_height, Some(height) if response.next_block > height) {
                break;
            }

            if response.next_block <= query.from_block {
                return Err(Error::StalledCursor {
                    from_block: query.from_block,
                    next_block: response.next_block,
                });
            }

            log::trace!(
                target: "indexer_client",
                "Continuing query from block {} to {}",
                response.next_block,
                end
            );

            query.from_block = response.next_block;
        }

        Ok(collected)
    }
}

#[cfg(any(test, feature = "mocks"))]
mockall::mock! {
    pub IndexerApi { }

    #[async_trait]
    impl IndexerApi for IndexerApi {
        async fn get_height(&self) -> Result<u64>;

        async fn get(&self, query: &Query) -> Result<QueryResponse>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(next_block: u64, archive_height: Option<u64>, block_number: u64) -> QueryResponse {
        QueryResponse {
            archive_height,
            next_block,
            total_execution_time: 1,
            data: vec![ResponseData {
                blocks: vec![json!({ "number": block_number })
                    .as_object()
                    .cloned()
                    .unwrap()],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_check_mock() {
        let _mock = MockIndexerApi::new();
    }

    #[tokio::test]
    async fn test_collect_follows_cursor_until_to_block() {
        let mut mock = MockIndexerApi::new();
        let mut seq = mockall::Sequence::new();

        mock.expect_get()
            .withf(|query| query.from_block == 0)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page(40, Some(1000), 1)));
        mock.expect_get()
            .withf(|query| query.from_block == 40)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page(100, Some(1000), 2)));

        let query = Query {
            from_block: 0,
            to_block: Some(100),
            ..Default::default()
        };

        let data = mock.collect(&query).await.unwrap();

        assert_eq!(data.blocks.len(), 2);
    }

    #[tokio::test]
    async fn test_collect_open_ended_stops_at_archive_height() {
        let mut mock = MockIndexerApi::new();

        mock.expect_get()
            .times(1)
            .returning(|_| Ok(page(500, Some(500), 7)));

        let data = mock.collect(&Query::default()).await.unwrap();

        assert_eq!(data.blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_collect_detects_stalled_cursor() {
        let mut mock = MockIndexerApi::new();

        mock.expect_get()
            .times(1)
            .returning(|_| Ok(page(10, Some(1000), 1)));

        let query = Query {
            from_block: 10,
            to_block: Some(100),
            ..Default::default()
        };

        let err = mock.collect(&query).await.unwrap_err();

        assert!(matches!(
            err,
            Error::StalledCursor {
                from_block: 10,
                next_block: 10
            }
        ));
    }

    #[tokio::test]
    async fn test_collect_stops_at_tip_before_to_block() {
        let mut mock = MockIndexerApi::new();

        mock.expect_get()
            .withf(|query| query.from_block == 0)
            .times(1)
            .returning(|_| Ok(page(1001, Some(1000), 1)));

        let query = Query {
            from_block: 0,
            to_block: Some(5000),
            ..Default::default()
        };

        let data = mock.collect(&query).await.unwrap();

        assert_eq!(data.blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_collect_from_past_the_tip_is_empty() {
        let mut mock = MockIndexerApi::new();

        mock.expect_get().times(1).returning(|query| {
            Ok(QueryResponse {
                archive_height: Some(1000),
                next_block: query.from_block,
                total_execution_time: 1,
                data: vec![],
            })
        });

        let query = Query {
            from_block: 5000,
            to_block: Some(6000),
            ..Default::default()
        };

        let data = mock.collect(&query).await.unwrap();

        assert!(data.blocks.is_empty());
    }
}
