/*
 * Test doubles for the native seam: a backend that replays a fixed script of
 * notifications and a sink that records every command sent to the dialog.
 */
use crate::dialog::TaskDialog;
use crate::error::Result as PlatformResult;
use crate::lifecycle::{CommandSink, DialogBackend, DialogCommand};
use crate::native::{self, CallbackReply, DialogRequest, NativeOutcome, Notification};
use crate::types::ControlsVersion;

use std::cell::RefCell;
use std::rc::Rc;

pub(crate) type CommandLog = Rc<RefCell<Vec<DialogCommand>>>;

#[derive(Default)]
pub(crate) struct RecordingSink {
    commands: CommandLog,
}

impl RecordingSink {
    pub(crate) fn commands(&self) -> CommandLog {
        Rc::clone(&self.commands)
    }
}

impl CommandSink for RecordingSink {
    fn execute(&mut self, command: DialogCommand) {
        self.commands.borrow_mut().push(command);
    }
}

pub(crate) struct ScriptedBackend {
    pub(crate) version: ControlsVersion,
    pub(crate) script: Vec<Notification>,
    pub(crate) outcome: NativeOutcome,
    pub(crate) request: Option<DialogRequest>,
    pub(crate) replies: Vec<(Notification, CallbackReply)>,
    commands: CommandLog,
}

impl ScriptedBackend {
    pub(crate) fn new(script: Vec<Notification>) -> Self {
        Self {
            version: ControlsVersion {
                major: 6,
                minor: 16,
                build: 0,
            },
            script,
            outcome: NativeOutcome {
                status: native::S_OK,
                selected_button: native::IDOK,
                selected_radio_button: 0,
                verification_checked: false,
            },
            request: None,
            replies: Vec::new(),
            commands: CommandLog::default(),
        }
    }

    pub(crate) fn commands(&self) -> CommandLog {
        Rc::clone(&self.commands)
    }

    /// Reply to the first occurrence of `notification` in the script.
    pub(crate) fn reply_to(&self, notification: &Notification) -> Option<CallbackReply> {
        self.replies
            .iter()
            .find(|(sent, _)| sent == notification)
            .map(|(_, reply)| *reply)
    }
}

impl DialogBackend for ScriptedBackend {
    fn common_controls_version(&self) -> PlatformResult<ControlsVersion> {
        Ok(self.version)
    }

    fn run_dialog(
        &mut self,
        request: &DialogRequest,
        dialog: &mut TaskDialog,
    ) -> PlatformResult<NativeOutcome> {
        self.request = Some(request.clone());
        for notification in self.script.clone() {
            if notification == Notification::DialogConstructed {
                dialog.attach_command_sink(Box::new(RecordingSink {
                    commands: Rc::clone(&self.commands),
                }));
            }
            let reply = dialog.dispatch_notification(notification.clone());
            self.replies.push((notification, reply));
        }
        Ok(self.outcome)
    }
}
