//! JMdict XML reader.
//!
//! Only the parts the tool prints are kept:
//!
//! ```text
//! <entry>
//!   <k_ele><keb>書く</keb></k_ele>        -> writings
//!   <r_ele><reb>かく</reb></r_ele>        -> readings
//!   <sense>
//!     <pos>&v5k;</pos>                    -> pos ("v5k")
//!     <gloss>to write</gloss>             -> glosses
//!   </sense>
//! </entry>
//! ```
//!
//! POS values are DTD entity references. They are kept by entity name rather
//! than expanded. A sense without `<pos>` inherits the previous sense's tags.

use super::{DictionaryEntry, Sense};
use crate::error::DictionaryError;
use quick_xml::Reader;
use quick_xml::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Keb,
    Reb,
    Pos,
    Gloss,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"keb" => Some(Field::Keb),
            b"reb" => Some(Field::Reb),
            b"pos" => Some(Field::Pos),
            b"gloss" => Some(Field::Gloss),
            _ => None,
        }
    }
}

pub(super) fn parse(xml: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut entry: Option<DictionaryEntry> = None;
    let mut sense: Option<Sense> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"entry" => entry = Some(DictionaryEntry::default()),
                b"sense" => sense = Some(Sense::default()),
                tag => {
                    if let Some(f) = Field::from_tag(tag) {
                        field = Some(f);
                        text.clear();
                    }
                }
            },
            Ok(Event::Text(e)) => match field {
                Some(Field::Pos) => text.push_str(&entity_name(&String::from_utf8_lossy(&e))),
                Some(_) => match e.unescape() {
                    Ok(unescaped) => text.push_str(&unescaped),
                    Err(_) => text.push_str(&String::from_utf8_lossy(&e)),
                },
                None => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"entry" => entries.extend(entry.take()),
                b"sense" => {
                    if let (Some(mut done), Some(current)) = (sense.take(), entry.as_mut()) {
                        if done.pos.is_empty() {
                            if let Some(previous) = current.senses.last() {
                                done.pos = previous.pos.clone();
                            }
                        }
                        current.senses.push(done);
                    }
                }
                tag => {
                    if let Some(f) = Field::from_tag(tag).filter(|f| field == Some(*f)) {
                        field = None;
                        let value = std::mem::take(&mut text);
                        match (f, entry.as_mut(), sense.as_mut()) {
                            (Field::Keb, Some(current), _) => current.writings.push(value),
                            (Field::Reb, Some(current), _) => current.readings.push(value),
                            (Field::Pos, _, Some(s)) => s.pos.push(value),
                            (Field::Gloss, _, Some(s)) => s.glosses.push(value),
                            _ => {}
                        }
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DictionaryError::Xml { reason: format!("at byte {}: {e}", reader.buffer_position()) });
            }
            _ => {}
        }
    }

    tracing::debug!(entries = entries.len(), "parsed JMdict entries");
    Ok(entries)
}

/// `&v5k;` -> `v5k`; anything else is returned unchanged.
fn entity_name(raw: &str) -> String {
    raw.strip_prefix('&').and_then(|s| s.strip_suffix(';')).unwrap_or(raw).to_string()
}
