// ABOUTME: PPTX generation module for the mdslides application
// ABOUTME: Builds title-and-content slides in memory and writes them as a PowerPoint package

use crate::errors::Result;
use crate::utils;
use log::{debug, info};
use quick_xml::escape::escape;
use std::borrow::Cow;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use zip::{ZipWriter, write::FileOptions};

/// English Metric Units per inch
pub const EMU_PER_INCH: i64 = 914_400;

/// Convert inches to EMU
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Character formatting applied to a slide title
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f64,
    pub bold: bool,
    pub color: Option<RgbColor>,
}

/// Formatting applied to every paragraph of a slide body
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    /// Font size in points
    pub size: f64,
    /// Space after each paragraph in points
    pub space_after: f64,
}

/// Slide layouts carried by the generated slide master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    TitleAndContent,
    TitleOnly,
}

impl SlideLayout {
    const ALL: [SlideLayout; 2] = [SlideLayout::TitleAndContent, SlideLayout::TitleOnly];

    /// 1-based index of the layout part inside the package
    fn part_index(self) -> usize {
        match self {
            SlideLayout::TitleAndContent => 1,
            SlideLayout::TitleOnly => 2,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SlideLayout::TitleAndContent => "Title and Content",
            SlideLayout::TitleOnly => "Title Only",
        }
    }

    fn type_attr(self) -> &'static str {
        match self {
            SlideLayout::TitleAndContent => "obj",
            SlideLayout::TitleOnly => "titleOnly",
        }
    }
}

/// Metadata written to docProps/core.xml and docProps/app.xml
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    pub title: String,
    pub author: String,
    pub company: String,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
            author: "mdslides".to_string(),
            company: String::new(),
        }
    }
}

/// A single slide under construction
#[derive(Debug, Clone)]
pub struct Slide {
    layout: SlideLayout,
    title: String,
    title_style: Option<TextStyle>,
    body: Option<String>,
    body_style: Option<ParagraphStyle>,
}

impl Slide {
    fn new(layout: SlideLayout) -> Self {
        Self {
            layout,
            title: String::new(),
            title_style: None,
            body: None,
            body_style: None,
        }
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_title(&mut self, text: impl Into<String>) -> &mut Self {
        self.title = text.into();
        self
    }

    pub fn set_title_style(&mut self, style: TextStyle) -> &mut Self {
        self.title_style = Some(style);
        self
    }

    /// Set the body text. Each line becomes its own paragraph.
    pub fn set_body(&mut self, text: impl Into<String>) -> &mut Self {
        self.body = Some(text.into());
        self
    }

    pub fn set_body_paragraph_style(&mut self, style: ParagraphStyle) -> &mut Self {
        self.body_style = Some(style);
        self
    }

    fn to_xml(&self) -> String {
        let mut shapes = title_shape_xml(&self.title, self.title_style.as_ref());
        if self.layout == SlideLayout::TitleAndContent {
            if let Some(body) = &self.body {
                shapes.push_str(&body_shape_xml(body, self.body_style.as_ref()));
            }
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">
    <p:cSld>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="0" y="0"/>
                    <a:ext cx="0" cy="0"/>
                    <a:chOff x="0" y="0"/>
                    <a:chExt cx="0" cy="0"/>
                </a:xfrm>
            </p:grpSpPr>
{shapes}        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sld>"#
        )
    }
}

fn title_shape_xml(title: &str, style: Option<&TextStyle>) -> String {
    let mut run_props = String::from(r#"<a:rPr lang="en-US" dirty="0""#);
    let mut fill = String::new();
    if let Some(style) = style {
        run_props.push_str(&format!(r#" sz="{}""#, font_size(style.size)));
        if style.bold {
            run_props.push_str(r#" b="1""#);
        }
        if let Some(color) = style.color {
            fill = format!(
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.hex()
            );
        }
    }
    let run_props = if fill.is_empty() {
        format!("{run_props}/>")
    } else {
        format!("{run_props}>{fill}</a:rPr>")
    };

    format!(
        r#"            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="2" name="Title 1"/>
                    <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
                    <p:nvPr><p:ph type="title"/></p:nvPr>
                </p:nvSpPr>
                <p:spPr/>
                <p:txBody>
                    <a:bodyPr/>
                    <a:lstStyle/>
                    <a:p>{runs}</a:p>
                </p:txBody>
            </p:sp>
"#,
        runs = text_runs_xml(title, &run_props)
    )
}

fn body_shape_xml(body: &str, style: Option<&ParagraphStyle>) -> String {
    let (paragraph_props, size_attr) = match style {
        Some(style) => (
            format!(
                r#"<a:pPr><a:spcAft><a:spcPts val="{}"/></a:spcAft></a:pPr>"#,
                font_size(style.space_after)
            ),
            format!(r#" sz="{}""#, font_size(style.size)),
        ),
        None => (String::new(), String::new()),
    };

    let run_props = format!(r#"<a:rPr lang="en-US"{size_attr} dirty="0"/>"#);
    let paragraphs: String = body
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                format!(
                    r#"                    <a:p>{paragraph_props}<a:endParaRPr lang="en-US"{size_attr} dirty="0"/></a:p>
"#
                )
            } else {
                format!(
                    r#"                    <a:p>{paragraph_props}{}</a:p>
"#,
                    text_runs_xml(line, &run_props)
                )
            }
        })
        .collect();

    format!(
        r#"            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="3" name="Content Placeholder 2"/>
                    <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
                    <p:nvPr><p:ph idx="1"/></p:nvPr>
                </p:nvSpPr>
                <p:spPr/>
                <p:txBody>
                    <a:bodyPr><a:normAutofit/></a:bodyPr>
                    <a:lstStyle/>
{paragraphs}                </p:txBody>
            </p:sp>
"#
    )
}

/// Runs for one paragraph of text. Vertical tabs become line breaks.
fn text_runs_xml(text: &str, run_props: &str) -> String {
    text.split('\u{B}')
        .map(|part| {
            let safe = xml_safe_text(part);
            format!("<a:r>{run_props}<a:t>{}</a:t></a:r>", escape(&*safe))
        })
        .collect::<Vec<String>>()
        .join("<a:br/>")
}

/// Replace characters XML 1.0 cannot carry with `_xHHHH_` escapes
fn xml_safe_text(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_xml_illegal) {
        return Cow::Borrowed(text);
    }
    let mut safe = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_xml_illegal(ch) {
            safe.push_str(&format!("_x{:04X}_", ch as u32));
        } else {
            safe.push(ch);
        }
    }
    Cow::Owned(safe)
}

fn is_xml_illegal(ch: char) -> bool {
    matches!(
        ch,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// DrawingML sizes are expressed in hundredths of a point
fn font_size(points: f64) -> i64 {
    (points * 100.0).round() as i64
}

/// An in-memory presentation that can be written as a .pptx package
#[derive(Debug, Clone)]
pub struct Presentation {
    width: i64,
    height: i64,
    properties: DocumentProperties,
    slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty presentation with the given slide size in EMU
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            properties: DocumentProperties::default(),
            slides: Vec::new(),
        }
    }

    pub fn with_properties(mut self, properties: DocumentProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Append a slide using `layout` and return it for editing
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut Slide {
        self.slides.push(Slide::new(layout));
        let index = self.slides.len() - 1;
        &mut self.slides[index]
    }

    /// Write the presentation to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        info!("Saving presentation to {:?}", path);
        utils::ensure_parent_directory_exists(path)?;

        let file = fs::File::create(path)?;
        self.write_to(file)?;

        info!("PPTX file created at {:?}", path);
        Ok(())
    }

    /// Write the presentation package to any seekable writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let slide_count = self.slides.len();

        add_part(&mut zip, "[Content_Types].xml", &self.content_types_xml())?;
        add_part(&mut zip, "_rels/.rels", PACKAGE_RELS_XML)?;
        add_part(&mut zip, "docProps/app.xml", &self.app_xml())?;
        add_part(&mut zip, "docProps/core.xml", &self.core_xml())?;
        add_part(&mut zip, "ppt/presentation.xml", &self.presentation_xml())?;
        add_part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            &self.presentation_rels_xml(),
        )?;
        add_part(&mut zip, "ppt/presProps.xml", PRES_PROPS_XML)?;
        add_part(&mut zip, "ppt/theme/theme1.xml", THEME_XML)?;
        add_part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            &self.slide_master_xml(),
        )?;
        add_part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &slide_master_rels_xml(),
        )?;

        for layout in SlideLayout::ALL {
            let index = layout.part_index();
            add_part(
                &mut zip,
                &format!("ppt/slideLayouts/slideLayout{}.xml", index),
                &slide_layout_xml(layout),
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", index),
                SLIDE_LAYOUT_RELS_XML,
            )?;
        }

        for (i, slide) in self.slides.iter().enumerate() {
            let slide_num = i + 1;
            debug!("Creating slide XML: ppt/slides/slide{}.xml", slide_num);
            add_part(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", slide_num),
                &slide.to_xml(),
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
                &slide_rels_xml(slide.layout),
            )?;
        }

        info!("Finalizing PPTX package with {} slides", slide_count);
        zip.finish()?;
        Ok(())
    }

    fn content_types_xml(&self) -> String {
        let layouts = SlideLayout::ALL
            .iter()
            .map(|layout| {
                format!(
                    r#"    <Override PartName="/ppt/slideLayouts/slideLayout{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
                    layout.part_index()
                )
            })
            .collect::<Vec<String>>()
            .join("\n");
        let slides = (1..=self.slides.len())
            .map(|n| {
                format!(
                    r#"    <Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                    n
                )
            })
            .collect::<Vec<String>>()
            .join("\n");

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
    <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
    <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
{layouts}
{slides}
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#
        )
    }

    fn app_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>mdslides</Application>
    <PresentationFormat>Custom</PresentationFormat>
    <Slides>{}</Slides>
    <Company>{}</Company>
</Properties>"#,
            self.slides.len(),
            escape(self.properties.company.as_str())
        )
    }

    fn core_xml(&self) -> String {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{title}</dc:title>
    <dc:creator>{author}</dc:creator>
    <cp:lastModifiedBy>{author}</cp:lastModifiedBy>
    <cp:revision>1</cp:revision>
    <dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>
</cp:coreProperties>"#,
            title = escape(self.properties.title.as_str()),
            author = escape(self.properties.author.as_str()),
        )
    }

    fn presentation_xml(&self) -> String {
        // rId1 is the master, rId2 the theme, rId3 presProps; slides follow
        let slide_ids = if self.slides.is_empty() {
            String::new()
        } else {
            let ids = (0..self.slides.len())
                .map(|i| {
                    format!(
                        r#"        <p:sldId id="{}" r:id="rId{}"/>"#,
                        256 + i,
                        FIRST_SLIDE_REL + i
                    )
                })
                .collect::<Vec<String>>()
                .join("\n");
            format!("    <p:sldIdLst>\n{ids}\n    </p:sldIdLst>\n")
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1">
    <p:sldMasterIdLst>
        <p:sldMasterId id="2147483648" r:id="rId1"/>
    </p:sldMasterIdLst>
{slide_ids}    <p:sldSz cx="{cx}" cy="{cy}"/>
    <p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#,
            cx = self.width,
            cy = self.height
        )
    }

    fn presentation_rels_xml(&self) -> String {
        let mut rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="slideMasters/slideMaster1.xml"/>
    <Relationship Id="rId2" Type="{REL_BASE}/theme" Target="theme/theme1.xml"/>
    <Relationship Id="rId3" Type="{REL_BASE}/presProps" Target="presProps.xml"/>
"#
        );

        for i in 0..self.slides.len() {
            rels.push_str(&format!(
                r#"    <Relationship Id="rId{}" Type="{REL_BASE}/slide" Target="slides/slide{}.xml"/>"#,
                FIRST_SLIDE_REL + i,
                i + 1
            ));
            rels.push('\n');
        }

        rels.push_str("</Relationships>");
        rels
    }

    fn slide_master_xml(&self) -> String {
        let margin = self.width / 20;
        let content_width = self.width - 2 * margin;
        let title_y = self.height / 25;
        let title_height = self.height / 6;
        let body_y = self.height * 7 / 30;
        let body_height = self.height * 2 / 3;

        let layout_ids = SlideLayout::ALL
            .iter()
            .map(|layout| {
                format!(
                    r#"        <p:sldLayoutId id="{}" r:id="rId{}"/>"#,
                    2147483648u64 + layout.part_index() as u64,
                    layout.part_index()
                )
            })
            .collect::<Vec<String>>()
            .join("\n");

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">
    <p:cSld>
        <p:bg>
            <p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef>
        </p:bg>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="0" y="0"/>
                    <a:ext cx="0" cy="0"/>
                    <a:chOff x="0" y="0"/>
                    <a:chExt cx="0" cy="0"/>
                </a:xfrm>
            </p:grpSpPr>
            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="2" name="Title Placeholder 1"/>
                    <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
                    <p:nvPr><p:ph type="title"/></p:nvPr>
                </p:nvSpPr>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{margin}" y="{title_y}"/>
                        <a:ext cx="{content_width}" cy="{title_height}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
                </p:spPr>
                <p:txBody>
                    <a:bodyPr anchor="ctr"><a:normAutofit/></a:bodyPr>
                    <a:lstStyle/>
                    <a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r></a:p>
                </p:txBody>
            </p:sp>
            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="3" name="Text Placeholder 2"/>
                    <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
                    <p:nvPr><p:ph type="body" idx="1"/></p:nvPr>
                </p:nvSpPr>
                <p:spPr>
                    <a:xfrm>
                        <a:off x="{margin}" y="{body_y}"/>
                        <a:ext cx="{content_width}" cy="{body_height}"/>
                    </a:xfrm>
                    <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
                </p:spPr>
                <p:txBody>
                    <a:bodyPr><a:normAutofit/></a:bodyPr>
                    <a:lstStyle/>
                    <a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master text styles</a:t></a:r></a:p>
                </p:txBody>
            </p:sp>
        </p:spTree>
    </p:cSld>
    <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
    <p:sldLayoutIdLst>
{layout_ids}
    </p:sldLayoutIdLst>
    <p:txStyles>
        <p:titleStyle>
            <a:lvl1pPr algn="l"><a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr>
        </p:titleStyle>
        <p:bodyStyle>
            <a:lvl1pPr marL="0" indent="0"><a:buNone/><a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr>
        </p:bodyStyle>
        <p:otherStyle>
            <a:lvl1pPr><a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr>
        </p:otherStyle>
    </p:txStyles>
</p:sldMaster>"#
        )
    }
}

/// Relationship id of the first slide in presentation.xml.rels
const FIRST_SLIDE_REL: usize = 4;

fn add_part<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, content: &str) -> Result<()> {
    debug!("Writing package part: {}", name);
    zip.start_file(name, FileOptions::default())?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn slide_rels_xml(layout: SlideLayout) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>
</Relationships>"#,
        layout.part_index()
    )
}

fn slide_master_rels_xml() -> String {
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for layout in SlideLayout::ALL {
        let index = layout.part_index();
        rels.push_str(&format!(
            r#"    <Relationship Id="rId{index}" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout{index}.xml"/>"#
        ));
        rels.push('\n');
    }
    rels.push_str(&format!(
        r#"    <Relationship Id="rId{}" Type="{REL_BASE}/theme" Target="../theme/theme1.xml"/>"#,
        SlideLayout::ALL.len() + 1
    ));
    rels.push_str("\n</Relationships>");
    rels
}

fn slide_layout_xml(layout: SlideLayout) -> String {
    let body = match layout {
        SlideLayout::TitleAndContent => {
            r#"
            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="3" name="Content Placeholder 2"/>
                    <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
                    <p:nvPr><p:ph idx="1"/></p:nvPr>
                </p:nvSpPr>
                <p:spPr/>
                <p:txBody>
                    <a:bodyPr/>
                    <a:lstStyle/>
                    <a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master text styles</a:t></a:r></a:p>
                </p:txBody>
            </p:sp>"#
        }
        SlideLayout::TitleOnly => "",
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="{kind}" preserve="1">
    <p:cSld name="{name}">
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="0" y="0"/>
                    <a:ext cx="0" cy="0"/>
                    <a:chOff x="0" y="0"/>
                    <a:chExt cx="0" cy="0"/>
                </a:xfrm>
            </p:grpSpPr>
            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="2" name="Title 1"/>
                    <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
                    <p:nvPr><p:ph type="title"/></p:nvPr>
                </p:nvSpPr>
                <p:spPr/>
                <p:txBody>
                    <a:bodyPr/>
                    <a:lstStyle/>
                    <a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r></a:p>
                </p:txBody>
            </p:sp>{body}
        </p:spTree>
    </p:cSld>
    <p:clrMapOvr>
        <a:masterClrMapping/>
    </p:clrMapOvr>
</p:sldLayout>"#,
        kind = layout.type_attr(),
        name = layout.name()
    )
}

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const SLIDE_LAYOUT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#;

const PRES_PROPS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
    <a:themeElements>
        <a:clrScheme name="Office">
            <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
            <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
            <a:dk2><a:srgbClr val="1F497D"/></a:dk2>
            <a:lt2><a:srgbClr val="EEECE1"/></a:lt2>
            <a:accent1><a:srgbClr val="4F81BD"/></a:accent1>
            <a:accent2><a:srgbClr val="C0504D"/></a:accent2>
            <a:accent3><a:srgbClr val="9BBB59"/></a:accent3>
            <a:accent4><a:srgbClr val="8064A2"/></a:accent4>
            <a:accent5><a:srgbClr val="4BACC6"/></a:accent5>
            <a:accent6><a:srgbClr val="F79646"/></a:accent6>
            <a:hlink><a:srgbClr val="0000FF"/></a:hlink>
            <a:folHlink><a:srgbClr val="800080"/></a:folHlink>
        </a:clrScheme>
        <a:fontScheme name="Office">
            <a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
            <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
        </a:fontScheme>
        <a:fmtScheme name="Office">
            <a:fillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:fillStyleLst>
            <a:lnStyleLst>
                <a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
                <a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
            </a:lnStyleLst>
            <a:effectStyleLst>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
                <a:effectStyle><a:effectLst/></a:effectStyle>
            </a:effectStyleLst>
            <a:bgFillStyleLst>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
                <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
            </a:bgFillStyleLst>
        </a:fmtScheme>
    </a:themeElements>
</a:theme>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn package(presentation: &Presentation) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut buffer = Cursor::new(Vec::new());
        presentation
            .write_to(&mut buffer)
            .expect("Failed to write package");
        ZipArchive::new(Cursor::new(buffer.into_inner())).expect("Failed to read package")
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut part = archive.by_name(name).expect("Missing package part");
        let mut content = String::new();
        part.read_to_string(&mut content)
            .expect("Failed to read package part");
        content
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(inches(10.0), 9_144_000);
        assert_eq!(inches(7.5), 6_858_000);
        assert_eq!(font_size(44.0), 4400);
    }

    #[test]
    fn test_empty_presentation_has_no_slide_parts() {
        let presentation = Presentation::new(inches(10.0), inches(7.5));
        let mut archive = package(&presentation);

        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert!(!names.iter().any(|n| n.starts_with("ppt/slides/")));
        assert!(names.contains(&"ppt/slideMasters/slideMaster1.xml".to_string()));
        assert!(names.contains(&"ppt/theme/theme1.xml".to_string()));

        let xml = read_part(&mut archive, "ppt/presentation.xml");
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_slide_title_style_and_body_paragraphs() {
        let mut presentation = Presentation::new(inches(10.0), inches(7.5));
        presentation
            .add_slide(SlideLayout::TitleAndContent)
            .set_title("Q&A <live>")
            .set_title_style(TextStyle {
                size: 44.0,
                bold: true,
                color: Some(RgbColor(0, 51, 102)),
            })
            .set_body("first\n\nsecond")
            .set_body_paragraph_style(ParagraphStyle {
                size: 18.0,
                space_after: 12.0,
            });

        let mut archive = package(&presentation);
        let xml = read_part(&mut archive, "ppt/slides/slide1.xml");

        assert!(xml.contains("<a:t>Q&amp;A &lt;live&gt;</a:t>"));
        assert!(xml.contains(r#"sz="4400" b="1""#));
        assert!(xml.contains(r#"<a:srgbClr val="003366"/>"#));
        assert!(xml.contains(r#"<a:spcPts val="1200"/>"#));
        assert!(xml.contains("<a:t>first</a:t>"));
        assert!(xml.contains("<a:t>second</a:t>"));
        assert!(xml.contains("<a:endParaRPr"));
        assert_eq!(xml.matches("<a:p>").count(), 4);

        let rels = read_part(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains("slideLayout1.xml"));
    }

    #[test]
    fn test_control_characters_are_made_xml_safe() {
        let mut presentation = Presentation::new(inches(10.0), inches(7.5));
        presentation
            .add_slide(SlideLayout::TitleAndContent)
            .set_title("Title\u{B}with vt")
            .set_body("body\u{1}line\nplain");

        let mut archive = package(&presentation);
        let xml = read_part(&mut archive, "ppt/slides/slide1.xml");

        assert!(!xml.chars().any(is_xml_illegal));
        assert!(xml.contains(r#"<a:t>Title</a:t></a:r><a:br/><a:r><a:rPr lang="en-US" dirty="0"/><a:t>with vt</a:t>"#));
        assert!(xml.contains("<a:t>body_x0001_line</a:t>"));
        assert!(xml.contains("<a:t>plain</a:t>"));
    }

    #[test]
    fn test_xml_safe_text_keeps_legal_text_borrowed() {
        assert!(matches!(xml_safe_text("tab\tok é"), Cow::Borrowed(_)));
        assert_eq!(xml_safe_text("a\u{1F}b\u{FFFF}"), "a_x001F_b_xFFFF_");
    }

    #[test]
    fn test_title_only_slide_references_its_layout() {
        let mut presentation = Presentation::new(inches(10.0), inches(7.5));
        presentation.add_slide(SlideLayout::TitleOnly).set_title("Alone");

        let mut archive = package(&presentation);
        let xml = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(!xml.contains(r#"<p:ph idx="1"/>"#));

        let rels = read_part(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains("slideLayout2.xml"));
    }

    #[test]
    fn test_slide_order_and_relationships() {
        let mut presentation = Presentation::new(inches(10.0), inches(7.5));
        for title in ["one", "two", "three"] {
            presentation
                .add_slide(SlideLayout::TitleAndContent)
                .set_title(title);
        }

        let mut archive = package(&presentation);
        let xml = read_part(&mut archive, "ppt/presentation.xml");
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId6"/>"#));

        let rels = read_part(&mut archive, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId6" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml""#));

        let types = read_part(&mut archive, "[Content_Types].xml");
        assert_eq!(types.matches("/ppt/slides/slide").count(), 3);

        assert!(read_part(&mut archive, "ppt/slides/slide3.xml").contains("<a:t>three</a:t>"));
    }

    #[test]
    fn test_document_properties_are_escaped() {
        let presentation = Presentation::new(inches(10.0), inches(7.5)).with_properties(
            DocumentProperties {
                title: "R&D Review".to_string(),
                author: "QuickAI".to_string(),
                company: "A <B> C".to_string(),
            },
        );

        let mut archive = package(&presentation);
        let core = read_part(&mut archive, "docProps/core.xml");
        assert!(core.contains("<dc:title>R&amp;D Review</dc:title>"));
        assert!(core.contains("<dc:creator>QuickAI</dc:creator>"));

        let app = read_part(&mut archive, "docProps/app.xml");
        assert!(app.contains("<Company>A &lt;B&gt; C</Company>"));
        assert!(app.contains("<Slides>0</Slides>"));
    }
}
