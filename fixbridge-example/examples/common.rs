//! Common utilities shared across examples.

#![allow(dead_code)]

use std::env;

/// FIX 4.4 subset used by the demos.
pub const SAMPLE_DICTIONARY: &str = r#"<fix type="FIX" major="4" minor="4" servicepack="0">
  <header>
    <field name="BeginString" required="Y"/>
    <field name="BodyLength" required="Y"/>
    <field name="MsgType" required="Y"/>
    <field name="SenderCompID" required="Y"/>
    <field name="TargetCompID" required="Y"/>
    <field name="MsgSeqNum" required="Y"/>
    <field name="SendingTime" required="Y"/>
  </header>
  <trailer>
    <field name="CheckSum" required="Y"/>
  </trailer>
  <messages>
    <message name="Heartbeat" msgtype="0" msgcat="admin"/>
    <message name="MarketDataSnapshotFullRefresh" msgtype="W" msgcat="app">
      <field name="Symbol" required="Y"/>
      <field name="SecurityExchange" required="N"/>
      <group name="NoMDEntries" required="Y">
        <field name="MDEntryType" required="Y"/>
        <field name="MDEntryPx" required="N"/>
        <field name="MDEntryTime" required="N"/>
      </group>
    </message>
  </messages>
  <components/>
  <fields>
    <field number="8" name="BeginString" type="STRING"/>
    <field number="9" name="BodyLength" type="LENGTH"/>
    <field number="10" name="CheckSum" type="STRING"/>
    <field number="34" name="MsgSeqNum" type="SEQNUM"/>
    <field number="35" name="MsgType" type="STRING"/>
    <field number="49" name="SenderCompID" type="STRING"/>
    <field number="52" name="SendingTime" type="UTCTIMESTAMP"/>
    <field number="55" name="Symbol" type="STRING"/>
    <field number="56" name="TargetCompID" type="STRING"/>
    <field number="207" name="SecurityExchange" type="EXCHANGE"/>
    <field number="268" name="NoMDEntries" type="NUMINGROUP"/>
    <field number="269" name="MDEntryType" type="CHAR"/>
    <field number="270" name="MDEntryPx" type="PRICE"/>
    <field number="273" name="MDEntryTime" type="UTCTIMEONLY"/>
  </fields>
</fix>"#;

/// Example configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ExampleConfig {
    /// Data dictionary path; the built-in sample is used when unset.
    pub dictionary_path: Option<String>,
    /// Sender CompID.
    pub sender_comp_id: String,
    /// Target CompID.
    pub target_comp_id: String,
}

impl ExampleConfig {
    /// Reads `FIXBRIDGE_DICTIONARY`, `FIX_SENDER` and `FIX_TARGET`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            dictionary_path: env::var("FIXBRIDGE_DICTIONARY").ok(),
            sender_comp_id: env::var("FIX_SENDER").unwrap_or_else(|_| "BRIDGE".to_string()),
            target_comp_id: env::var("FIX_TARGET").unwrap_or_else(|_| "EXCHANGE".to_string()),
        }
    }
}

/// Initializes logging for examples.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
