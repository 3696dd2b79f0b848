use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{ScreenshotPayload, TradeScreenshot};

/// Insert one decoded screenshot for a trade. Runs on a connection so the
/// caller's transaction covers it.
pub async fn insert_screenshot(
    conn: &mut PgConnection,
    trade_id: Uuid,
    payload: &ScreenshotPayload,
) -> anyhow::Result<TradeScreenshot> {
    let screenshot = sqlx::query_as::<_, TradeScreenshot>(
        r#"
        INSERT INTO trade_screenshots (trade_id, image_data, mime_type)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(trade_id)
    .bind(&payload.bytes)
    .bind(&payload.mime_type)
    .fetch_one(conn)
    .await?;

    Ok(screenshot)
}

/// Get all screenshots attached to a trade.
pub async fn get_by_trade(pool: &PgPool, trade_id: Uuid) -> anyhow::Result<Vec<TradeScreenshot>> {
    let screenshots = sqlx::query_as::<_, TradeScreenshot>(
        "SELECT * FROM trade_screenshots WHERE trade_id = $1",
    )
    .bind(trade_id)
    .fetch_all(pool)
    .await?;

    Ok(screenshots)
}
