use tracing::{debug, warn};

use super::error::PlacesError;
use super::loader::{ScriptReady, ScriptStatus};

/// Identifies one attachment of a [`PlacesWidget`] to the address field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

impl BindingId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A "place selected" event raised by a widget binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceSelected {
    pub binding: BindingId,
    pub formatted_address: String,
}

/// An address-suggestion widget that can be bound to and unbound from the
/// address field.
pub trait PlacesWidget {
    /// Starts offering suggestions. Each call returns a fresh binding id.
    fn attach(&mut self) -> Result<BindingId, PlacesError>;

    /// Stops the binding; events it raised afterwards must be ignored.
    fn detach(&mut self, binding: BindingId);
}

/// Manages the autocomplete binding on the address field.
///
/// The widget is bound while the field is mounted, manual entry is off and
/// the lookup service is ready. Readiness may arrive after mount, so callers
/// poll with [`poll_ready`](Self::poll_ready) (or await
/// [`wait_and_attach`](Self::wait_and_attach)). At most one binding is live
/// at a time and it is always released before a new one is made.
#[derive(Debug)]
pub struct AddressAutocomplete<W: PlacesWidget> {
    widget: W,
    ready: ScriptReady,
    binding: Option<BindingId>,
    mounted: bool,
    manual_entry: bool,
    attach_failed: bool,
}

impl<W: PlacesWidget> AddressAutocomplete<W> {
    pub fn new(widget: W, ready: ScriptReady) -> Self {
        Self {
            widget,
            ready,
            binding: None,
            mounted: false,
            manual_entry: false,
            attach_failed: false,
        }
    }

    /// The address field is on screen. Binds at once if the service is ready.
    pub fn mount(&mut self, manual_entry: bool) {
        self.mounted = true;
        self.manual_entry = manual_entry;
        self.try_bind();
    }

    /// Manual entry on releases the binding so the widget cannot overwrite
    /// free text; off binds again (now, or once the service is ready).
    pub fn set_manual_entry(&mut self, manual_entry: bool) {
        if self.manual_entry == manual_entry {
            return;
        }
        self.manual_entry = manual_entry;
        if manual_entry {
            self.unbind();
        } else {
            self.attach_failed = false;
            self.try_bind();
        }
    }

    /// Completes a deferred bind if the service has become ready since the
    /// last call. Returns whether a binding is live.
    pub fn poll_ready(&mut self) -> bool {
        self.try_bind();
        self.is_bound()
    }

    /// Waits for the service, then binds if still wanted.
    pub async fn wait_and_attach(&mut self) -> Result<(), PlacesError> {
        self.ready.wait().await?;
        self.try_bind();
        Ok(())
    }

    /// Returns the address to write into the field, if `event` came from the
    /// live binding and carries an address.
    pub fn accept(&self, event: PlaceSelected) -> Option<String> {
        if self.binding != Some(event.binding) {
            debug!(?event.binding, "place from stale binding ignored");
            return None;
        }
        let address = event.formatted_address.trim();
        (!address.is_empty()).then(|| address.to_string())
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Autocomplete is wanted but the service has not settled yet.
    pub fn is_pending(&self) -> bool {
        self.wants_binding() && self.binding.is_none() && self.ready.status() == ScriptStatus::Loading
    }

    pub fn status(&self) -> ScriptStatus {
        self.ready.status()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// The address field is going away: release the binding.
    pub fn teardown(&mut self) {
        self.unbind();
        self.mounted = false;
    }

    fn wants_binding(&self) -> bool {
        self.mounted && !self.manual_entry
    }

    fn try_bind(&mut self) {
        if !self.wants_binding() || self.binding.is_some() || self.attach_failed {
            return;
        }
        if !self.ready.is_ready() {
            return;
        }
        match self.widget.attach() {
            Ok(binding) => {
                debug!(?binding, "address autocomplete bound");
                self.binding = Some(binding);
            }
            Err(e) => {
                warn!(error = %e, "address autocomplete unavailable, using plain text");
                self.attach_failed = true;
            }
        }
    }

    fn unbind(&mut self) {
        if let Some(binding) = self.binding.take() {
            self.widget.detach(binding);
            debug!(?binding, "address autocomplete released");
        }
    }
}

impl<W: PlacesWidget> Drop for AddressAutocomplete<W> {
    fn drop(&mut self) {
        self.unbind();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::form::BookingFormController;
    use crate::model::Field;
    use crate::places::ScriptLoader;

    #[derive(Debug, Default)]
    struct FakeWidget {
        next: u64,
        live: HashSet<BindingId>,
        attaches: usize,
        detaches: usize,
        refuse: bool,
    }

    impl PlacesWidget for FakeWidget {
        fn attach(&mut self) -> Result<BindingId, PlacesError> {
            if self.refuse {
                return Err(PlacesError::Attach("no input".into()));
            }
            self.next += 1;
            self.attaches += 1;
            let id = BindingId::new(self.next);
            self.live.insert(id);
            Ok(id)
        }

        fn detach(&mut self, binding: BindingId) {
            self.detaches += 1;
            self.live.remove(&binding);
        }
    }

    fn place(binding: BindingId, address: &str) -> PlaceSelected {
        PlaceSelected {
            binding,
            formatted_address: address.into(),
        }
    }

    fn live_binding(auto: &AddressAutocomplete<FakeWidget>) -> BindingId {
        *auto.widget().live.iter().next().unwrap()
    }

    mod binding {
        use super::*;

        #[test]
        fn binds_on_mount_when_ready() {
            let loader = ScriptLoader::new();
            loader.mark_ready();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(false);
            assert!(auto.is_bound());
            assert_eq!(auto.widget().attaches, 1);
        }

        #[test]
        fn defers_until_ready() {
            let loader = ScriptLoader::new();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(false);
            assert!(!auto.is_bound());
            assert!(auto.is_pending());

            loader.mark_ready();
            assert!(auto.poll_ready());
            assert!(!auto.is_pending());
        }

        #[test]
        fn never_double_registers() {
            let loader = ScriptLoader::new();
            loader.mark_ready();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(false);
            auto.poll_ready();
            auto.poll_ready();
            auto.set_manual_entry(false);
            assert_eq!(auto.widget().attaches, 1);
            assert_eq!(auto.widget().live.len(), 1);
        }

        #[test]
        fn failed_load_leaves_plain_text() {
            let loader = ScriptLoader::failed();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(false);
            assert!(!auto.poll_ready());
            assert!(!auto.is_pending());
            assert_eq!(auto.widget().attaches, 0);
        }

        #[test]
        fn refused_attach_is_not_retried_every_tick() {
            let loader = ScriptLoader::new();
            loader.mark_ready();
            let widget = FakeWidget {
                refuse: true,
                ..FakeWidget::default()
            };
            let mut auto = AddressAutocomplete::new(widget, loader.subscribe());
            auto.mount(false);
            auto.widget_mut().refuse = false;
            assert!(!auto.poll_ready());
        }

        #[test]
        fn teardown_and_drop_release() {
            let loader = ScriptLoader::new();
            loader.mark_ready();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(false);
            auto.teardown();
            assert!(!auto.is_bound());
            assert!(auto.widget().live.is_empty());
            assert!(!auto.poll_ready());
        }

        #[tokio::test]
        async fn wait_and_attach_binds_after_ready() {
            let loader = ScriptLoader::new();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(false);
            loader.mark_ready();
            auto.wait_and_attach().await.unwrap();
            assert!(auto.is_bound());
        }
    }

    mod manual_entry {
        use super::*;

        #[test]
        fn enabling_detaches_and_ignores_old_events() {
            let loader = ScriptLoader::new();
            loader.mark_ready();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            let mut form = BookingFormController::new();
            auto.mount(false);
            let old = live_binding(&auto);

            form.set_text(Field::Address, "12 my own words");
            auto.set_manual_entry(true);
            assert!(!auto.is_bound());
            assert_eq!(auto.widget().detaches, 1);

            if let Some(address) = auto.accept(place(old, "1 George St, Sydney NSW")) {
                form.apply_place(address);
            }
            assert_eq!(form.state().address, "12 my own words");
        }

        #[test]
        fn disabling_rebinds_with_fresh_id() {
            let loader = ScriptLoader::new();
            loader.mark_ready();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(false);
            let old = live_binding(&auto);
            auto.set_manual_entry(true);
            auto.set_manual_entry(false);

            let new = live_binding(&auto);
            assert_ne!(old, new);
            assert_eq!(auto.widget().live.len(), 1);
            assert_eq!(auto.accept(place(old, "x")), None);
            assert_eq!(
                auto.accept(place(new, "1 George St, Sydney NSW 2000")),
                Some("1 George St, Sydney NSW 2000".to_string())
            );
        }

        #[test]
        fn disabling_before_ready_defers() {
            let loader = ScriptLoader::new();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(true);
            auto.set_manual_entry(false);
            assert!(!auto.is_bound());
            loader.mark_ready();
            assert!(auto.poll_ready());
        }

        #[test]
        fn manual_mount_stays_unbound_when_ready() {
            let loader = ScriptLoader::new();
            loader.mark_ready();
            let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
            auto.mount(true);
            assert!(!auto.poll_ready());
        }
    }

    #[test]
    fn blank_place_is_ignored() {
        let loader = ScriptLoader::new();
        loader.mark_ready();
        let mut auto = AddressAutocomplete::new(FakeWidget::default(), loader.subscribe());
        auto.mount(false);
        let live = live_binding(&auto);
        assert_eq!(auto.accept(place(live, "  ")), None);
    }
}
