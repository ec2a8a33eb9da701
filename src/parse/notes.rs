//! Assembling of tap and slide notes from decoded lane events.

use std::{collections::BTreeMap, ops::Range};

use crate::{
    command::{mixin::SourceRangeMixinExt, time::ObjTime},
    model::notes::{Note, NotePoint, Slide, Tap},
};

use super::{ParseWarning, ParseWarningWithRange, message::LaneObj};

/// The slot kind which starts a slide.
const SLIDE_START: u8 = 1;
/// The slot kind which ends a slide.
const SLIDE_END: u8 = 2;

/// The start of a slide waiting for its end.
#[derive(Debug, Clone, PartialEq)]
struct OpenSlide {
    point: NotePoint,
    time: ObjTime,
    range: Range<usize>,
}

impl OpenSlide {
    fn close(self, channel: u8, end: NotePoint) -> Slide {
        Slide {
            channel,
            start: self.point,
            end,
        }
    }

    fn into_unclosed_warning(self, channel: u8) -> ParseWarningWithRange {
        ParseWarning::UnclosedSlide {
            channel,
            time: self.time,
        }
        .into_wrapper_range(self.range)
    }
}

/// Builds notes line by line.
///
/// Slides are paired by their channel. A start waits in `open_slides` across lines until the
/// end on the same channel comes, and the channel can be used again after that.
#[derive(Debug, Default)]
pub(crate) struct NoteAssembler {
    notes: Vec<Note>,
    open_slides: BTreeMap<u8, OpenSlide>,
    warnings: Vec<ParseWarningWithRange>,
}

impl NoteAssembler {
    /// Processes a tap line `#XXX1x:...`. Every slot is a tap, whose width is the second digit.
    pub(crate) fn on_tap(&mut self, lane: u8, objs: impl IntoIterator<Item = LaneObj>) {
        self.notes.extend(objs.into_iter().map(|obj| {
            Note::Tap(Tap {
                point: NotePoint::new(lane, obj.data[1], obj.beat),
            })
        }));
    }

    /// Processes a slide line `#XXX3xy:...`.
    ///
    /// A start and an end both on this line are paired with each other first, without touching
    /// the slides opened by previous lines. A start left open is carried to the later lines after
    /// the whole line is processed.
    pub(crate) fn on_slide(
        &mut self,
        lane: u8,
        channel: u8,
        objs: impl IntoIterator<Item = LaneObj>,
        range: Range<usize>,
    ) {
        // a line has only one channel, so the scratch holds one start at most
        let mut local: Option<OpenSlide> = None;
        for obj in objs {
            let [kind, width] = obj.data;
            let point = NotePoint::new(lane, width, obj.beat);
            match kind {
                SLIDE_START => {
                    let opened = OpenSlide {
                        point,
                        time: obj.time,
                        range: range.clone(),
                    };
                    if let Some(overwritten) = local.replace(opened) {
                        self.warnings.push(overwritten.into_unclosed_warning(channel));
                    }
                }
                SLIDE_END => {
                    let Some(start) = local.take().or_else(|| self.open_slides.remove(&channel))
                    else {
                        self.warnings.push(
                            ParseWarning::UnmatchedSlideEnd {
                                channel,
                                time: obj.time,
                            }
                            .into_wrapper_range(range.clone()),
                        );
                        continue;
                    };
                    self.notes.push(Note::Slide(start.close(channel, point)));
                }
                _ => {}
            }
        }
        if let Some(overwritten) = local.and_then(|start| self.open_slides.insert(channel, start)) {
            self.warnings.push(overwritten.into_unclosed_warning(channel));
        }
    }

    /// Finishes assembling. Slides never closed are dropped with warnings.
    pub(crate) fn finish(mut self) -> (Vec<Note>, Vec<ParseWarningWithRange>) {
        for (channel, start) in std::mem::take(&mut self.open_slides) {
            self.warnings.push(start.into_unclosed_warning(channel));
        }
        (self.notes, self.warnings)
    }
}
