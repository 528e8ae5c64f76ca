//! JSON output formatting

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// Write `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_appends_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"hour": 3})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"hour\": 3\n}\n");
    }
}
