//! Bridge round trip example.
//!
//! Parses a market data snapshot off the wire, hands it to the bridge as an
//! inbound application message, prints the mapping the host receives, then
//! sends a mapping back out through a registered session.

mod common;

use std::sync::Arc;

use common::{ExampleConfig, SAMPLE_DICTIONARY, init_logging};
use fixbridge_core::{FieldMapping, TypedValue};
use fixbridge_dictionary::{Dictionary, TypeDictionary};
use fixbridge_engine::{
    Application, BridgeBuilder, BridgeConfig, CounterpartyRole, SessionId, SessionRegistry,
};
use fixbridge_tagvalue::{Encoder, MessageParser};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = ExampleConfig::from_env();

    let dictionary = match &cfg.dictionary_path {
        Some(path) => Dictionary::load(path)?,
        None => Dictionary::from_xml_str(SAMPLE_DICTIONARY)?,
    };
    let types = Arc::new(TypeDictionary::from_dictionary(&dictionary));
    let registry = Arc::new(SessionRegistry::new());
    let session = SessionId::new("FIX.4.4", &cfg.sender_comp_id, &cfg.target_comp_id);
    let mut outbound = registry.register(session.clone());

    let config = BridgeConfig::new(CounterpartyRole::Initiator, "sample.xml");
    let (bridge, mut host) = BridgeBuilder::new(config)
        .with_dictionary(types)
        .with_registry(Arc::clone(&registry))
        .build()?;

    let host_task = tokio::spawn(async move {
        while let Some(frame) = host.recv().await {
            match frame {
                Ok(mapping) => info!("host received: {:?}", mapping),
                Err(e) => info!("host link error: {}", e),
            }
        }
    });

    let mut encoder = Encoder::new("FIX.4.4");
    encoder.put_str(35, "W");
    encoder.put_str(49, &cfg.target_comp_id);
    encoder.put_str(56, &cfg.sender_comp_id);
    encoder.put_uint(34, 1);
    encoder.put_str(52, "20240315-09:30:00.250");
    encoder.put_str(55, "MSFT");
    encoder.put_str(207, "XNAS");
    encoder.put_uint(268, 2);
    encoder.put_str(269, "0");
    encoder.put_str(270, "415.10");
    encoder.put_str(269, "1");
    encoder.put_str(270, "415.12");
    let wire = encoder.finish();

    let message = MessageParser::new(&dictionary).parse(&wire)?;
    bridge.on_logon(&session).await;
    if let Err(reason) = bridge.from_app(&message, &session).await {
        anyhow::bail!("bridge rejected message: {}", reason.text);
    }

    let order = FieldMapping::new()
        .with(8, "FIX.4.4")
        .with(35, "W")
        .with(49, cfg.sender_comp_id.as_str())
        .with(56, cfg.target_comp_id.as_str())
        .with(55, "MSFT")
        .with(207, TypedValue::Symbol("XNAS".into()))
        .with_group(
            268,
            vec![FieldMapping::new().with(269, '0').with(270, 415.11)],
        );
    bridge.send(&order)?;

    if let Some(bytes) = outbound.recv().await {
        info!(
            "outbound wire: {}",
            String::from_utf8_lossy(&bytes).replace('\x01', "|")
        );
    }

    bridge.on_logout(&session).await;
    registry.unregister(&session);
    drop(bridge);
    host_task.await?;
    Ok(())
}
