use redis::{AsyncCommands, RedisResult};
use tracing::info;

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    /// Cache a quoted price for its validity window. The TTL is the whole
    /// expiry mechanism; once it lapses the quote is simply gone.
    pub async fn cache_quote(
        &self,
        quote_id: &str,
        payload: &str,
        ttl_seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = format!("quote:{}", quote_id);
        conn.set_ex::<_, _, ()>(key, payload, ttl_seconds).await?;
        info!("Quote cached: {} (ttl {}s)", quote_id, ttl_seconds);
        Ok(())
    }

    pub async fn get_quote(&self, quote_id: &str) -> RedisResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = format!("quote:{}", quote_id);
        conn.get(key).await
    }

    pub async fn delete_quote(&self, quote_id: &str) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = format!("quote:{}", quote_id);
        conn.del(key).await
    }

    pub async fn check_rate_limit(
        &self,
        key: &str,
        limit: i64,
        window_seconds: i64,
    ) -> RedisResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count,): (i64,) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .expire(key, window_seconds)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count <= limit)
    }
}
