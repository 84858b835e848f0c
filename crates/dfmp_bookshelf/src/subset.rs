//! Smaller benchmarks cut from a loaded design.

use dfmp_model::{Design, Macro, MacroId, ModelError};

/// Builds a design holding the first `max_nets` nets of `design` and every
/// macro they touch.
///
/// Macros keep their arena order, size, fixed flag, position and rotation.
/// Ports are reconnected with the same offsets. Macros touched by no
/// kept net are dropped.
pub fn subset(design: &Design, max_nets: usize) -> Result<Design, ModelError> {
    let nets = &design.nets()[..max_nets.min(design.net_count())];

    let mut keep = vec![false; design.macro_count()];
    for net in nets {
        for (_, pin) in net.all_pins() {
            keep[pin.macro_id.index()] = true;
        }
    }

    let mut out = Design::new();
    let mut remap: Vec<Option<MacroId>> = vec![None; design.macro_count()];
    for (m, _) in design.macros().iter().zip(&keep).filter(|(_, &k)| k) {
        let (w, h) = m.size();
        let mut copy = Macro::new(m.name(), w, h, m.is_fixed());
        let p = m.position();
        copy.set_position(p.x, p.y);
        copy.set_rotation(m.rotation());
        remap[m.id().index()] = Some(out.add_macro(copy)?);
    }

    for net in nets {
        let id = out.add_net(net.name())?;
        for (direction, pin) in net.all_pins() {
            let Some(target) = remap[pin.macro_id.index()] else {
                continue;
            };
            let offset = design.macro_ref(pin.macro_id).port(pin.port).offset;
            out.connect(id, target, direction, offset)?;
        }
    }

    log::info!(
        "subset: kept {} of {} nets, {} of {} macros",
        out.net_count(),
        design.net_count(),
        out.macro_count(),
        design.macro_count()
    );
    Ok(out)
}
