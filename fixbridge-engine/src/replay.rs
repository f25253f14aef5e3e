/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX log replay.
//!
//! Each log line carries a prefix (timestamp, direction, session) followed by
//! `" : "` and the raw message. Messages are parsed without checksum
//! validation and delivered through [`Application::from_app`] as if they had
//! just arrived.

use crate::application::{Application, SessionId};
use crate::config::strip_path_marker;
use fixbridge_core::error::{DecodeError, FixError};
use fixbridge_dictionary::Dictionary;
use fixbridge_tagvalue::MessageParser;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Separator between a log line's prefix and its message.
pub const LOG_SEPARATOR: &str = " : ";

/// Counters for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Messages accepted by the application.
    pub delivered: usize,
    /// Messages the application rejected.
    pub rejected: usize,
}

/// Returns the message part of a log line.
///
/// # Errors
/// Returns `DecodeError::MalformedLogLine` if the line has no separator.
pub fn message_text(line: &str, line_number: usize) -> Result<&str, DecodeError> {
    line.rfind(LOG_SEPARATOR)
        .map(|pos| &line[pos + LOG_SEPARATOR.len()..])
        .ok_or(DecodeError::MalformedLogLine { line: line_number })
}

/// Replays a FIX log file through an application.
///
/// Path markers are stripped from both paths. Blank lines are skipped;
/// a message the application rejects is logged and counted.
///
/// # Errors
/// Returns `DictionaryError` if the dictionary cannot be loaded, `FixError::Io`
/// if the log cannot be read, and `DecodeError` for the first line that is
/// malformed or cannot be parsed.
pub async fn replay_log<A: Application + ?Sized>(
    dictionary_path: &str,
    log_path: &str,
    application: &A,
) -> Result<ReplaySummary, FixError> {
    let dictionary = Dictionary::load(strip_path_marker(dictionary_path))?;
    let parser = MessageParser::new(&dictionary).with_checksum_validation(false);

    let log_path = strip_path_marker(log_path);
    let file = File::open(&log_path).await?;
    let mut lines = BufReader::new(file).lines();
    tracing::info!(path = %log_path, "replaying log");

    let mut summary = ReplaySummary::default();
    let mut line_number = 0;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let message = parser.parse(message_text(line, line_number)?.as_bytes())?;
        let session_id = SessionId::from_header(&message).unwrap_or_default();
        match application.from_app(&message, &session_id).await {
            Ok(()) => summary.delivered += 1,
            Err(reason) => {
                tracing::warn!(line = line_number, reason = %reason.text, "replayed message rejected");
                summary.rejected += 1;
            }
        }
    }

    tracing::info!(
        path = %log_path,
        delivered = summary.delivered,
        rejected = summary.rejected,
        "replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{NoOpApplication, RejectReason};
    use async_trait::async_trait;
    use fixbridge_core::message::Message;
    use parking_lot::Mutex;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DICTIONARY: &str = r#"<fix type="FIX" major="4" minor="4" servicepack="0">
  <header>
    <field name="BeginString" required="Y"/>
    <field name="BodyLength" required="Y"/>
    <field name="MsgType" required="Y"/>
    <field name="SenderCompID" required="Y"/>
    <field name="TargetCompID" required="Y"/>
  </header>
  <trailer>
    <field name="CheckSum" required="Y"/>
  </trailer>
  <messages>
    <message name="NewOrderSingle" msgtype="D" msgcat="app">
      <field name="Symbol" required="Y"/>
    </message>
  </messages>
  <components/>
  <fields>
    <field number="8" name="BeginString" type="STRING"/>
    <field number="9" name="BodyLength" type="LENGTH"/>
    <field number="10" name="CheckSum" type="STRING"/>
    <field number="35" name="MsgType" type="STRING"/>
    <field number="49" name="SenderCompID" type="STRING"/>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="56" name="TargetCompID" type="STRING"/>
  </fields>
</fix>"#;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(SessionId, String)>>,
        reject: bool,
    }

    #[async_trait]
    impl Application for Recorder {
        async fn from_app(
            &self,
            message: &Message,
            session_id: &SessionId,
        ) -> Result<(), RejectReason> {
            let symbol = message.body().get_field(55).unwrap_or_default().to_string();
            self.seen.lock().push((session_id.clone(), symbol));
            if self.reject {
                return Err(RejectReason::new(RejectReason::OTHER, "rejected"));
            }
            Ok(())
        }
    }

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn log_line(prefix: &str, symbol: &str) -> String {
        format!(
            "{prefix} : 8=FIX.4.4\x019=40\x0135=D\x0149=BANK\x0156=CLIENT\x0155={symbol}\x0110=000\x01\n"
        )
    }

    #[test]
    fn test_message_text() {
        assert_eq!(
            message_text("20240101-10:00:00 : FIX.4.4:A->B : 8=FIX.4.4", 1).unwrap(),
            "8=FIX.4.4"
        );
        assert_eq!(
            message_text("no separator", 7),
            Err(DecodeError::MalformedLogLine { line: 7 })
        );
    }

    #[tokio::test]
    async fn test_replay_delivers_messages() {
        let dict = write_file(DICTIONARY);
        let log = write_file(&format!(
            "{}\n{}",
            log_line("20240101-10:00:00.000 : FIX.4.4:BANK->CLIENT", "MSFT"),
            log_line("20240101-10:00:01.000", "AAPL")
        ));

        let app = Recorder::default();
        let summary = replay_log(
            dict.path().to_str().unwrap(),
            log.path().to_str().unwrap(),
            &app,
        )
        .await
        .unwrap();

        assert_eq!(summary, ReplaySummary { delivered: 2, rejected: 0 });
        let seen = app.seen.lock();
        assert_eq!(seen[0].0, SessionId::new("FIX.4.4", "BANK", "CLIENT"));
        assert_eq!(seen[0].1, "MSFT");
        assert_eq!(seen[1].1, "AAPL");
    }

    #[tokio::test]
    async fn test_replay_counts_rejections() {
        let dict = write_file(DICTIONARY);
        let log = write_file(&log_line("t", "IBM"));
        let app = Recorder {
            reject: true,
            ..Recorder::default()
        };

        let summary = replay_log(
            dict.path().to_str().unwrap(),
            log.path().to_str().unwrap(),
            &app,
        )
        .await
        .unwrap();
        assert_eq!(summary, ReplaySummary { delivered: 0, rejected: 1 });
    }

    #[tokio::test]
    async fn test_replay_malformed_line() {
        let dict = write_file(DICTIONARY);
        let log = write_file(&format!("{}garbage line\n", log_line("t", "IBM")));

        let result = replay_log(
            dict.path().to_str().unwrap(),
            log.path().to_str().unwrap(),
            &NoOpApplication,
        )
        .await;
        assert!(matches!(
            result,
            Err(FixError::Decode(DecodeError::MalformedLogLine { line: 2 }))
        ));
    }

    #[tokio::test]
    async fn test_replay_missing_log() {
        let dict = write_file(DICTIONARY);
        let result = replay_log(
            dict.path().to_str().unwrap(),
            "/nonexistent/fix.log",
            &NoOpApplication,
        )
        .await;
        assert!(matches!(result, Err(FixError::Io(_))));
    }
}
