//! Subcommand handlers.

use std::path::Path;
use std::sync::Arc;

use keycap_capture::{
    BindingCoordinator, ExternalOutcome, ExternalShortcutController, RecordOutcome,
    SettingsBackend, ShortcutRecorder,
};
use keycap_common::{BindingError, KeycapError, NotificationQueue, OsType, RawKeyEvent};
use keycap_config::SettingsStore;
use keycap_platform::{current_session, format_combination, format_external_label, normalize};

use crate::cli::Command;
use crate::script::{bus_for, load_script, replay};

pub async fn run(command: Command, store: SettingsStore, os: OsType) -> Result<(), KeycapError> {
    match command {
        Command::Format {
            combination,
            external,
        } => {
            let label = if external {
                format_external_label(&combination, os)
            } else {
                format_combination(&combination, os)
            };
            println!("{label}");
            Ok(())
        }
        Command::Normalize {
            code,
            key,
            key_code,
        } => {
            let event = RawKeyEvent::down(code, key).with_key_code(key_code);
            println!("{}", normalize(&event, os));
            Ok(())
        }
        Command::Probe => {
            probe(&store, os);
            Ok(())
        }
        Command::Config => {
            println!("{}", keycap_config::config_to_json(store.config()));
            Ok(())
        }
        other => {
            let constrained = store.config().capture.constrained;
            let backend = Arc::new(SettingsBackend::new(store));
            let coordinator = BindingCoordinator::new(backend);
            run_with_backend(other, coordinator, os, constrained).await
        }
    }
}

async fn run_with_backend(
    command: Command,
    coordinator: BindingCoordinator,
    os: OsType,
    constrained_override: Option<bool>,
) -> Result<(), KeycapError> {
    let mut recorder = ShortcutRecorder::new(coordinator.clone(), os);
    recorder.load_bindings().await?;

    match command {
        Command::List { json } => list(&recorder, json),
        Command::Record { id, script } => record(&mut recorder, &id, &script).await,
        Command::External { script } => {
            let mut controller = ExternalShortcutController::new(coordinator, os);
            external(&mut controller, &script, constrained_override).await
        }
        Command::Reset { id } => {
            recorder.reset_binding(&id).await?;
            print_label(&recorder, &id);
            Ok(())
        }
        Command::Add => {
            let binding = recorder.add_binding().await?;
            println!("added {}", binding.id);
            print_label(&recorder, &binding.id);
            Ok(())
        }
        Command::Remove { id } => {
            recorder.remove_binding(&id).await?;
            println!("removed {id}");
            Ok(())
        }
        Command::Format { .. }
        | Command::Normalize { .. }
        | Command::Probe
        | Command::Config => Ok(()),
    }
}

fn list(recorder: &ShortcutRecorder, json: bool) -> Result<(), KeycapError> {
    let views = recorder.binding_views();
    if json {
        let out = serde_json::to_string_pretty(&views)
            .map_err(|e| KeycapError::Other(format!("failed to serialize bindings: {e}")))?;
        println!("{out}");
        return Ok(());
    }
    for view in views {
        println!("{:<20} {:<28} {}", view.id, view.label, view.current_binding);
    }
    Ok(())
}

async fn record(recorder: &mut ShortcutRecorder, id: &str, script: &Path) -> Result<(), KeycapError> {
    let events = load_script(script)?;
    let bus = bus_for(&events);
    if !recorder.start_recording(id, &bus).await {
        return Err(BindingError::NotFound(id.to_string()).into());
    }
    replay(bus, events);

    let outcome = recorder.run().await;
    print_notifications(recorder.notifications_mut());
    match outcome {
        RecordOutcome::Committed(binding) => {
            println!(
                "{} = {} ({})",
                binding.id,
                binding.current_binding,
                format_combination(&binding.current_binding, recorder.os())
            );
            Ok(())
        }
        RecordOutcome::Failed { error, .. } => Err(error.into()),
        RecordOutcome::Cancelled => {
            println!("cancelled");
            Ok(())
        }
        other => Err(KeycapError::Other(format!("recording ended unexpectedly: {other:?}"))),
    }
}

async fn external(
    controller: &mut ExternalShortcutController,
    script: &Path,
    constrained_override: Option<bool>,
) -> Result<(), KeycapError> {
    let events = load_script(script)?;
    let bus = bus_for(&events);
    if !controller.start(&bus).await {
        let hint = match constrained_override {
            Some(false) => "[capture] constrained = false in settings",
            _ => "the session supports native global hotkeys",
        };
        return Err(KeycapError::Other(format!(
            "external shortcut capture is not available: {hint}"
        )));
    }
    replay(bus, events);

    let outcome = controller.run().await;
    print_notifications(controller.notifications_mut());

    match outcome {
        ExternalOutcome::Configured(accelerator) => {
            match controller.label() {
                Some(label) => println!("{accelerator} ({label})"),
                None => println!("{accelerator}"),
            }
            Ok(())
        }
        ExternalOutcome::Failed(error) => Err(BindingError::External(error).into()),
        ExternalOutcome::Cancelled => {
            println!("cancelled");
            Ok(())
        }
        other => Err(KeycapError::Other(format!("capture ended unexpectedly: {other:?}"))),
    }
}

fn probe(store: &SettingsStore, os: OsType) {
    let session = current_session();
    let capture = &store.config().capture;
    let constrained = capture.constrained.unwrap_or_else(|| session.is_constrained());
    println!("os:          {os}");
    println!("session:     {:?}", session.kind);
    println!("desktop:     {:?}", session.desktop);
    println!(
        "constrained: {constrained}{}",
        if capture.constrained.is_some() { " (config override)" } else { "" }
    );
}

fn print_label(recorder: &ShortcutRecorder, id: &str) {
    if let Some(label) = recorder.label_for(id) {
        println!("{id}: {label}");
    }
}

fn print_notifications(queue: &mut NotificationQueue) {
    for n in queue.drain() {
        if n.body.is_empty() {
            eprintln!("{:?}: {}", n.level, n.title);
        } else {
            eprintln!("{:?}: {}: {}", n.level, n.title, n.body);
        }
    }
}
