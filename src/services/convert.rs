use std::collections::HashMap;
use tracing::debug;

use crate::models::types::ObjectId;
use crate::services::docs::{DocsDocument, InlineObject, InlineObjectElement, StructuralElement};

/// Paragraph style that maps to a level-1 heading.
const TITLE_STYLE: &str = "TITLE";

/// Metadata of one embedded image: where to download it from, its alt text,
/// and the object id used as the local filename stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentImage {
    pub content_uri: String,
    pub description: String,
    pub object_id: ObjectId,
}

/// One renderable unit of the converted document. The variant set is closed:
/// everything else the source format can hold is dropped during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Heading { body: String },
    Text { body: String },
    Image(DocumentImage),
}

impl Element {
    /// Serializes the element to its markdown fragment. The image link points
    /// at the local file named after the object id; the `.jpg` extension is
    /// fixed regardless of the remote image's real format.
    pub fn markdown(&self) -> String {
        match self {
            Element::Heading { body } => format!("# {}\n", body),
            Element::Text { body } => format!("{}\n", body),
            Element::Image(image) => {
                format!("![{}]({}.jpg)\n", image.description, image.object_id)
            }
        }
    }
}

/// Converted document: flat element sequence in source order plus an index of
/// the embedded images, keyed by object id.
#[derive(Debug, Default)]
pub struct Document {
    pub title: String,
    pub elements: Vec<Element>,
    pub images: HashMap<ObjectId, DocumentImage>,
}

impl Document {
    /// Walks the wire document top to bottom and flattens it into renderable
    /// elements. Malformed or unhandled sub-structures are dropped, never
    /// raised: the walk itself cannot fail.
    pub fn from_wire(doc: &DocsDocument) -> Self {
        let mut out = Document {
            title: doc.title.clone(),
            ..Default::default()
        };
        for block in &doc.body.content {
            out.convert_block(block, &doc.inline_objects);
        }
        out
    }

    fn convert_block(
        &mut self,
        block: &StructuralElement,
        inline_objects: &HashMap<String, InlineObject>,
    ) {
        // only paragraphs are interpreted; tables, section breaks etc. are dropped
        let Some(paragraph) = block.paragraph.as_ref() else {
            debug!("convert: skipping non-paragraph block");
            return;
        };

        for run in &paragraph.elements {
            if let Some(text) = run.text_run.as_ref() {
                // content is carried verbatim, trailing newline included
                if paragraph.paragraph_style.named_style_type == TITLE_STYLE {
                    self.push(Element::Heading {
                        body: text.content.clone(),
                    });
                } else {
                    self.push(Element::Text {
                        body: text.content.clone(),
                    });
                }
                continue;
            }

            if let Some(reference) = run.inline_object_element.as_ref() {
                self.convert_inline_object(reference, inline_objects);
            }
        }
    }

    fn convert_inline_object(
        &mut self,
        reference: &InlineObjectElement,
        inline_objects: &HashMap<String, InlineObject>,
    ) {
        let Some(entry) = inline_objects.get(&reference.inline_object_id) else {
            debug!(id = %reference.inline_object_id, "convert: inline object not in table, dropping");
            return;
        };
        let Some(properties) = entry.inline_object_properties.as_ref() else {
            debug!(id = %entry.object_id, "convert: inline object without properties, dropping");
            return;
        };
        let Some(embedded) = properties.embedded_object.as_ref() else {
            debug!(id = %entry.object_id, "convert: inline object without embedded object, dropping");
            return;
        };
        let Some(image) = embedded.image_properties.as_ref() else {
            debug!(id = %entry.object_id, "convert: embedded object is not an image, dropping");
            return;
        };

        // the object id comes from the table entry, not the inline reference
        let image = DocumentImage {
            content_uri: image.content_uri.clone(),
            description: embedded.description.clone(),
            object_id: ObjectId::from(entry.object_id.as_str()),
        };
        self.images.insert(image.object_id.clone(), image.clone());
        self.push(Element::Image(image));
    }

    fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Concatenation of every element's fragment in sequence order.
    pub fn markdown(&self) -> String {
        self.elements.iter().map(Element::markdown).collect()
    }
}
