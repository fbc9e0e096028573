//! Example: show a few notices and print the resulting markup

use jsn_core::jsn_dom::Document;
use jsn_core::{NoticeEvent, Notifier, PartialOptions};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut doc = Document::new();
    let mut notifier = Notifier::with_options(PartialOptions::from_json(
        r#"{"positionClass": "jsn-bottom-right"}"#,
    )?);

    notifier.subscribe(|event| {
        if let NoticeEvent::Dismissed { id, reason } = event {
            println!("notice {id} dismissed: {reason:?}");
        }
    });

    notifier.success(&mut doc, Some("Saved"), "Your changes were stored", None)?;
    notifier.warning(&mut doc, None, "Disk almost full", None)?;
    let outcome = notifier.warning(&mut doc, None, "Disk almost full", None)?;
    println!("repeat warning: {outcome:?}");

    notifier.remove(&mut doc, None);
    println!("{}", doc.outer_html(doc.body()));
    Ok(())
}
