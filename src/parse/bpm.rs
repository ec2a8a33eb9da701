//! Collection of BPM definitions and their placements, into the anchors of the BPM timeline.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    ops::Range,
};

use strict_num_extended::{FinF64, PositiveF64};

use crate::{
    command::{BpmId, mixin::SourceRangeMixinExt, time::ObjTime},
    model::bpm::BpmAnchor,
};

use super::{
    ParseError, ParseWarning, ParseWarningWithRange, Result,
    prompt::{Prompter, PromptingDuplication},
};

#[derive(Debug, Clone)]
struct BpmDef {
    bpm: FinF64,
    range: Range<usize>,
}

#[derive(Debug, Clone)]
struct BpmPlacement {
    id: BpmId,
    time: ObjTime,
    beat: f64,
    range: Range<usize>,
}

/// Definitions keyed by id, and placements in source order. Placements are resolved against the
/// definitions after the whole file is read, so a definition may come after its placement.
#[derive(Debug, Default)]
pub(crate) struct BpmDefs {
    defs: BTreeMap<BpmId, BpmDef>,
    placements: Vec<BpmPlacement>,
}

impl BpmDefs {
    /// Registers `#BPMxx:n`.
    pub(crate) fn define(
        &mut self,
        id: BpmId,
        bpm: FinF64,
        range: Range<usize>,
        prompter: &impl Prompter,
        warnings: &mut Vec<ParseWarningWithRange>,
    ) -> Result<()> {
        let newer = BpmDef {
            bpm,
            range: range.clone(),
        };
        match self.defs.entry(id) {
            Entry::Vacant(entry) => {
                entry.insert(newer);
            }
            Entry::Occupied(mut entry) => {
                let duplication = PromptingDuplication::BpmDef {
                    id,
                    older: &entry.get().bpm,
                    newer: &bpm,
                };
                let warning = duplication.to_warning();
                let workaround = prompter.handle_duplication(duplication);
                if let Some(warning) = workaround
                    .apply(entry.get_mut(), newer, warning)
                    .map_err(|err| err.into_wrapper_range(range.clone()))?
                {
                    warnings.push(warning.into_wrapper_range(range));
                }
            }
        }
        Ok(())
    }

    /// Registers a slot of `#XXX08:...` which places the BPM `id` at `beat`.
    pub(crate) fn place(&mut self, id: BpmId, time: ObjTime, beat: f64, range: Range<usize>) {
        self.placements.push(BpmPlacement {
            id,
            time,
            beat,
            range,
        });
    }

    /// Resolves the placements and materializes the anchors in id order.
    ///
    /// A definition never placed does not become an anchor. But if none is placed, the lowest id
    /// is placed at the beat 0.
    pub(crate) fn into_anchors(
        self,
        prompter: &impl Prompter,
        warnings: &mut Vec<ParseWarningWithRange>,
    ) -> Result<Vec<BpmAnchor>> {
        let mut placed: BTreeMap<BpmId, BpmPlacement> = BTreeMap::new();
        for placement in self.placements {
            if !self.defs.contains_key(&placement.id) {
                return Err(ParseError::UndefinedBpm(placement.id).into_wrapper_range(placement.range));
            }
            match placed.entry(placement.id) {
                Entry::Vacant(entry) => {
                    entry.insert(placement);
                }
                Entry::Occupied(mut entry) => {
                    let duplication = PromptingDuplication::BpmPlacement {
                        id: placement.id,
                        older: entry.get().time,
                        newer: placement.time,
                    };
                    let warning = duplication.to_warning();
                    let range = placement.range.clone();
                    if let Some(warning) = prompter
                        .handle_duplication(duplication)
                        .apply(entry.get_mut(), placement, warning)
                        .map_err(|err| err.into_wrapper_range(range.clone()))?
                    {
                        warnings.push(warning.into_wrapper_range(range));
                    }
                }
            }
        }

        let defs = self
            .defs
            .into_iter()
            .map(|(id, def)| {
                PositiveF64::new(def.bpm.as_f64())
                    .map(|bpm| (id, bpm, def.range.clone()))
                    .map_err(|_| ParseError::NonPositiveBpm(id).into_wrapper_range(def.range))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut anchors = Vec::with_capacity(placed.len());
        for (id, bpm, range) in &defs {
            match placed.get(id) {
                Some(placement) => anchors.push(BpmAnchor::new(*id, *bpm, placement.beat)),
                None if !placed.is_empty() => {
                    warnings.push(ParseWarning::UnplacedBpm(*id).into_wrapper_range(range.clone()));
                }
                None => {}
            }
        }
        if anchors.is_empty() {
            let Some((id, bpm, range)) = defs.first() else {
                return Err(ParseError::NoBpmDefinition.into_wrapper_range(0..0));
            };
            warnings.push(ParseWarning::ImplicitInitialBpm(*id).into_wrapper_range(range.clone()));
            anchors.push(BpmAnchor::new(*id, *bpm, 0.0));
            for (id, _, range) in defs.iter().skip(1) {
                warnings.push(ParseWarning::UnplacedBpm(*id).into_wrapper_range(range.clone()));
            }
        }
        Ok(anchors)
    }
}
