//! `printh`, `reboot`, `stat` and `info`.

use pico_eval::{library, to_string, HostSignal, RuntimeError};

use super::{binding, none, Binding, Host};

pub(super) fn bindings(host: &Host) -> Vec<Binding> {
    let printer = host.printer.clone();
    vec![
        binding("printh", move |args| {
            let line = args
                .iter()
                .map(|arg| to_string(arg).map_err(|err| library("printh", err.to_string())))
                .collect::<Result<Vec<_>, _>>()?
                .join(" ");
            printer.println(&line);
            none()
        }),
        binding("reboot", |_| {
            tracing::info!("reboot requested");
            Err(RuntimeError::Signal(HostSignal::Reset))
        }),
        binding("stat", |_| Err(library("stat", "unimplemented"))),
        binding("info", |_| Err(library("info", "unimplemented"))),
    ]
}
