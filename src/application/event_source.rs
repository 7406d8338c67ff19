use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;

use crate::domain::models::EventEnvelope;
use crate::utils::logging;

/// Parse one newline-delimited JSON event envelope
pub fn parse_event_line(line: &str) -> Result<EventEnvelope> {
    serde_json::from_str(line.trim())
        .with_context(|| format!("undecodable event line: {}", line.trim()))
}

/// Read newline-delimited JSON envelopes and feed them into the projection
/// channel. Blank and undecodable lines are logged and skipped; the stream
/// order of the decodable lines is preserved. Returns the number of
/// envelopes forwarded.
pub async fn stream_events<R>(reader: R, tx: Sender<EventEnvelope>) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded: u64 = 0;

    while let Some(line) = lines.next_line().await.context("event stream read failed")? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_event_line(&line) {
            Ok(envelope) => {
                if tx.send(envelope).await.is_err() {
                    // Projection side hung up, nothing more to forward
                    break;
                }
                forwarded += 1;
            }
            Err(e) => logging::log_error(&format!("Skipping event line: {:#}", e)),
        }
    }

    Ok(forwarded)
}

/// Stream envelopes from stdin
pub async fn stream_stdin_events(tx: Sender<EventEnvelope>) -> Result<u64> {
    stream_events(BufReader::new(tokio::io::stdin()), tx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use crate::domain::models::MarketplaceEvent;

    #[test]
    fn parses_an_auction_created_line() {
        let line = r#"{
            "block_number": 12,
            "block_timestamp": 1700000000,
            "tx_sender": "0xSeller",
            "tx_hash": "0xabc",
            "event": {
                "type": "AuctionCreated",
                "auction_id": "0x1",
                "token": "0xNFT",
                "token_id": "5",
                "base_price": "100",
                "royalty_fees": "3",
                "payment_method": "0xToken",
                "royalty_recipient": "0xArtist"
            }
        }"#;

        let envelope = parse_event_line(line).unwrap();
        assert_eq!(envelope.block_number, 12);
        match envelope.event {
            MarketplaceEvent::AuctionCreated {
                auction_id,
                base_price,
                ..
            } => {
                assert_eq!(auction_id, "0x1");
                assert_eq!(base_price, BigDecimal::from(100));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_event_line("not json").is_err());
    }

    #[tokio::test]
    async fn skips_undecodable_lines_and_keeps_order() {
        let input = concat!(
            r#"{"block_number":1,"block_timestamp":10,"tx_sender":"0xa","tx_hash":"0x1","event":{"type":"Cancelled","auction_id":"0x1"}}"#,
            "\n",
            "garbage\n",
            "\n",
            r#"{"block_number":2,"block_timestamp":20,"tx_sender":"0xa","tx_hash":"0x2","event":{"type":"Cancelled","auction_id":"0x2"}}"#,
            "\n",
        );

        let (tx, mut rx) = tokio::sync::mpsc::channel(8);
        let forwarded = stream_events(BufReader::new(input.as_bytes()), tx)
            .await
            .unwrap();

        assert_eq!(forwarded, 2);
        assert_eq!(rx.recv().await.unwrap().block_number, 1);
        assert_eq!(rx.recv().await.unwrap().block_number, 2);
        assert!(rx.recv().await.is_none());
    }
}
