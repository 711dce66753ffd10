//! Inline formatting: line breaking and run assembly.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! Line breaking is greedy: words are placed left to right and a line is
//! closed as soon as the next word (plus its separating space) would exceed
//! the available width. Words are whitespace-atomic and never split; a word
//! wider than the whole line overflows on a line of its own. Consecutive
//! words governed by the same element accumulate into one run; a change of
//! governing element closes the run so each run carries exactly one resolved
//! text style.

use quill_dom::NodeId;

use crate::geometry::{Point, Size};
use crate::layout::layout_box::{ImageBox, LayoutBox, LineBox, RunBox};
use crate::layout::metrics::TextMetrics;
use crate::style::{TextAlign, TextStyle};

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// Line height as a multiple of the font size. 1.2 to 1.4 is the customary
/// range for "normal".
pub const LINE_HEIGHT_FACTOR: f32 = 1.3;

/// A run still accumulating words.
struct OpenRun {
    element: NodeId,
    style: TextStyle,
    x: f32,
    text: String,
}

/// Working state for one inline formatting pass.
///
/// Owns the growing child list (lines and images) of the box being laid
/// out. All coordinates are local to that box; `origin` is its content
/// offset, already folded into line and image positions as they close.
pub(crate) struct InlineFlow<'m> {
    metrics: &'m dyn TextMetrics,
    avail_w: f32,
    origin: Point,
    cursor_y: f32,
    children: Vec<LayoutBox>,
    runs: Vec<RunBox>,
    line_w: f32,
    line_h: f32,
    run: Option<OpenRun>,
}

impl<'m> InlineFlow<'m> {
    pub(crate) fn new(metrics: &'m dyn TextMetrics, avail_w: f32, origin: Point) -> Self {
        InlineFlow {
            metrics,
            avail_w,
            origin,
            cursor_y: origin.y,
            children: Vec::new(),
            runs: Vec::new(),
            line_w: 0.0,
            line_h: 0.0,
            run: None,
        }
    }

    /// Place one word governed by `element` with its resolved `style`.
    pub(crate) fn place_word(&mut self, element: NodeId, style: &TextStyle, word: &str) {
        let word_w = self.metrics.measure(word, style);
        let space_w = self.metrics.measure(" ", style);

        // A different governing element closes the current run.
        if self.run.as_ref().is_some_and(|r| r.element != element) {
            self.close_run();
        }

        if self.run.is_some() {
            if self.line_w + space_w + word_w <= self.avail_w {
                if let Some(run) = self.run.as_mut() {
                    run.text.push(' ');
                    run.text.push_str(word);
                }
                self.line_w += space_w + word_w;
            } else {
                self.close_line();
                self.start_run(element, style, 0.0, word);
                self.line_w = word_w;
            }
            return;
        }

        if self.line_w == 0.0 {
            // An empty line always accepts its first word, even one wider
            // than the available width.
            self.start_run(element, style, 0.0, word);
            self.line_w = word_w;
        } else if self.line_w + space_w + word_w <= self.avail_w {
            self.start_run(element, style, self.line_w + space_w, word);
            self.line_w += space_w + word_w;
        } else {
            self.close_line();
            self.start_run(element, style, 0.0, word);
            self.line_w = word_w;
        }
    }

    /// Place an image in the flow. The current line closes, the image
    /// occupies its own band, and flow resumes below it.
    pub(crate) fn place_image(&mut self, mut image: ImageBox) {
        self.close_line();
        image.position = Point::new(self.origin.x, self.cursor_y);
        self.cursor_y += image.size.h;
        self.children.push(LayoutBox::Image(image));
    }

    fn start_run(&mut self, element: NodeId, style: &TextStyle, x: f32, word: &str) {
        self.run = Some(OpenRun {
            element,
            style: style.clone(),
            x,
            text: word.to_string(),
        });
    }

    fn close_run(&mut self) {
        if let Some(run) = self.run.take() {
            let w = self.metrics.measure(&run.text, &run.style);
            let h = run.style.font_size * LINE_HEIGHT_FACTOR;
            // Resync to the measured width so alignment and hit-testing use
            // the same numbers the renderer will.
            self.line_w = run.x + w;
            self.line_h = self.line_h.max(h);
            self.runs.push(RunBox {
                element: run.element,
                text: run.text,
                position: Point::new(run.x, 0.0),
                size: Size::new(w, h),
                style: run.style,
            });
        }
    }

    fn close_line(&mut self) {
        self.close_run();
        if self.runs.is_empty() {
            return;
        }
        let runs = std::mem::take(&mut self.runs);
        self.children.push(LayoutBox::Line(LineBox {
            position: Point::new(self.origin.x, self.cursor_y),
            size: Size::new(self.line_w, self.line_h),
            runs,
        }));
        self.cursor_y += self.line_h;
        self.line_w = 0.0;
        self.line_h = 0.0;
    }

    /// Close any pending line, apply horizontal alignment, and yield the
    /// finished children plus the flow cursor (the content bottom edge).
    ///
    /// [§ 16.2 Alignment](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    ///
    /// Alignment is a post-pass over whole lines; runs keep their
    /// line-relative positions.
    pub(crate) fn finish(mut self, align: TextAlign) -> (Vec<LayoutBox>, f32) {
        self.close_line();
        if align != TextAlign::Left {
            for child in &mut self.children {
                if let LayoutBox::Line(line) = child {
                    let slack = self.avail_w - line.size.w;
                    let offset = match align {
                        TextAlign::Left => 0.0,
                        TextAlign::Center => slack / 2.0,
                        TextAlign::Right => slack,
                    };
                    line.position.x = self.origin.x + offset;
                }
            }
        }
        (self.children, self.cursor_y)
    }
}
