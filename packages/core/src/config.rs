use serde::{Deserialize, Serialize};

/// Settings for the external image and printer tools
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    #[serde(default)]
    pub transform: TransformConfig,

    #[serde(default)]
    pub printer: PrinterConfig,
}

/// ImageMagick invocation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformConfig {
    /// Binary to run
    pub program: String,

    /// Interior region kept from the exported image (`WxH+X+Y`)
    pub crop: String,

    /// White margin added beneath the image for the caption (`WxH`)
    pub splice: String,

    pub point_size: u32,

    /// Final label height in pixels
    pub height: u32,

    /// Font used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            program: "magick".to_string(),
            crop: "140x140+30+30".to_string(),
            splice: "0x40".to_string(),
            point_size: 35,
            height: 120,
            font: None,
        }
    }
}

/// ptouch-print invocation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrinterConfig {
    pub program: String,

    /// Gap printed before the second copy in cable mode
    pub cable_pad: u32,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            program: "ptouch-print".to_string(),
            cable_pad: 80,
        }
    }
}
