//! Scrub command - redact PII from text without scoring it

use scamshield::scrub::PiiScrubber;

pub async fn run(text: &str) -> anyhow::Result<()> {
    let result = PiiScrubber::new().scrub(text);

    println!("{}", result.text);
    if result.detected.is_empty() {
        eprintln!("(no PII found)");
    } else {
        let kinds: Vec<String> = result.detected.iter().map(|k| k.to_string()).collect();
        eprintln!("(redacted: {})", kinds.join(", "));
    }
    Ok(())
}
