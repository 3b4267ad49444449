//! Valentine Card entry point
//!
//! Handles platform-specific initialization: on wasm this builds the DOM,
//! wires events and runs the card; native is a stub.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlAudioElement, HtmlElement, PointerEvent, Window};

    use valentine_card::app::App;
    use valentine_card::config::{Content, NotifyMode};
    use valentine_card::consts::*;
    use valentine_card::evasion::EvadeMove;
    use valentine_card::media::{AudioSink, PlayError};
    use valentine_card::notify::{NoopNotifier, Notifier, WebhookNotifier};
    use valentine_card::petals::{self, PETAL_COLORS};
    use valentine_card::platform::{EventSubscription, TimerRegistry, Timeout, now_ms, viewport};
    use valentine_card::settings::LocalPrefStore;
    use valentine_card::{BoxRect, Screen};

    /// Callback slot invoked when a play() promise is rejected by the
    /// autoplay policy. Filled in after the shell exists.
    type BlockedSlot = Rc<RefCell<Option<Box<dyn Fn()>>>>;

    /// [`AudioSink`] over a real `<audio>` element.
    ///
    /// `play()` succeeding synchronously only means the promise was created;
    /// an autoplay block arrives as a rejection later and is routed through
    /// the blocked slot.
    struct ElementSink {
        element: HtmlAudioElement,
        on_blocked: BlockedSlot,
    }

    impl AudioSink for ElementSink {
        fn load(&mut self, source: &str) {
            self.element.set_src(source);
            self.element.load();
        }

        fn play(&mut self) -> Result<(), PlayError> {
            match self.element.play() {
                Ok(promise) => {
                    let on_blocked = self.on_blocked.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        if wasm_bindgen_futures::JsFuture::from(promise).await.is_err()
                            && let Some(callback) = on_blocked.borrow().as_ref()
                        {
                            callback();
                        }
                    });
                    Ok(())
                }
                Err(err) => Err(PlayError::Media(format!("{err:?}"))),
            }
        }

        fn pause(&mut self) {
            let _ = self.element.pause();
        }

        fn seek(&mut self, seconds: f64) {
            self.element.set_current_time(seconds);
        }

        fn position(&self) -> f64 {
            self.element.current_time()
        }

        fn set_volume(&mut self, volume: f64) {
            self.element.set_volume(volume);
        }
    }

    /// Everything the shell owns: the app core plus DOM handles and the
    /// scoped listeners/timers of the mounted screen.
    struct Shell {
        app: App<ElementSink>,
        window: Window,
        document: Document,
        body: HtmlElement,
        /// Screen container; swapped and animated on transitions
        main: HtmlElement,
        audio: HtmlAudioElement,
        audio_btn: HtmlElement,
        audio_hint: HtmlElement,
        theme_btn: HtmlElement,
        /// Timers owned by the mounted screen (cleared on transition)
        timers: TimerRegistry,
        /// Listeners owned by the mounted screen (dropped on transition)
        screen_subs: Vec<EventSubscription>,
        /// timeupdate/ended wiring; rebuilt per spec so each closure carries
        /// the epoch it was registered under
        audio_subs: Vec<EventSubscription>,
        /// One-shot "first gesture" retry listener
        gesture_sub: Option<EventSubscription>,
        /// Commits the in-flight dodge; replaced (cancelling the old one)
        /// whenever a newer dodge supersedes it
        commit_timer: Option<Timeout>,
        /// App-lifetime listeners (toggles, audio element errors)
        global_subs: Vec<EventSubscription>,
    }

    type ShellRc = Rc<RefCell<Shell>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Valentine Card starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;

        inject_stylesheet(&document, &body)?;

        let content = load_content(&document);
        let notifier: Box<dyn Notifier> = match content.notify_mode {
            NotifyMode::Webhook => Box::new(WebhookNotifier::new(content.webhook_url.clone())),
            NotifyMode::None => Box::new(NoopNotifier),
        };

        // One audio element for the whole session, kept in the DOM
        let audio = HtmlAudioElement::new()?;
        audio.set_preload("auto");
        body.append_child(&audio)?;

        let blocked_slot: BlockedSlot = Rc::new(RefCell::new(None));
        let sink = ElementSink {
            element: audio.clone(),
            on_blocked: blocked_slot.clone(),
        };

        let main = create_el(&document, "main", "card-stage")?;
        body.append_child(&main)?;
        let footer = create_el(&document, "footer", "footer")?;
        footer.set_text_content(Some("Made with love"));
        body.append_child(&footer)?;

        let (audio_btn, audio_hint, theme_btn) = build_controls(&document, &body)?;

        let app = App::new(
            content,
            sink,
            Box::new(LocalPrefStore::new()),
            notifier,
        );

        let shell = Rc::new(RefCell::new(Shell {
            app,
            window,
            document,
            body,
            main,
            audio,
            audio_btn,
            audio_hint,
            theme_btn,
            timers: TimerRegistry::new(),
            screen_subs: Vec::new(),
            audio_subs: Vec::new(),
            gesture_sub: None,
            commit_timer: None,
            global_subs: Vec::new(),
        }));

        // Route rejected play() promises back into the session
        {
            let rc = shell.clone();
            *blocked_slot.borrow_mut() = Some(Box::new(move || {
                let mut shell = rc.borrow_mut();
                shell.app.session_mut().playback_blocked();
                refresh_audio_ui(&shell);
                arm_gesture_listener(&mut shell, &rc);
            }));
        }

        {
            let mut sh = shell.borrow_mut();
            apply_theme(&sh);
            refresh_audio_ui(&sh);
            rebuild_audio_subs(&mut sh, &shell);
            setup_global_controls(&mut sh, &shell);
        }
        mount_current(&shell);

        log::info!("Valentine Card running");
        Ok(())
    }

    /// Content comes from an optional JSON `<script id="card-config">` block;
    /// anything missing (or unparseable) falls back to the built-in card.
    fn load_content(document: &Document) -> Content {
        let raw = document
            .get_element_by_id("card-config")
            .and_then(|el| el.text_content());
        match raw {
            Some(json) => match Content::from_json(&json) {
                Ok(content) => content,
                Err(err) => {
                    log::warn!("bad card-config, using defaults: {err}");
                    Content::default()
                }
            },
            None => Content::default(),
        }
    }

    fn create_el(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = document.create_element(tag)?.dyn_into()?;
        el.set_class_name(class);
        Ok(el)
    }

    fn build_controls(
        document: &Document,
        body: &HtmlElement,
    ) -> Result<(HtmlElement, HtmlElement, HtmlElement), JsValue> {
        let bar = create_el(document, "div", "controls")?;
        let hint = create_el(document, "span", "audio-hint hidden")?;
        hint.set_text_content(Some("Tap anywhere to enable sound"));
        let audio_btn = create_el(document, "button", "ctl-btn")?;
        audio_btn.set_attribute("aria-label", "Toggle Sound")?;
        let theme_btn = create_el(document, "button", "ctl-btn")?;
        theme_btn.set_attribute("aria-label", "Toggle Theme")?;
        bar.append_child(&hint)?;
        bar.append_child(&audio_btn)?;
        bar.append_child(&theme_btn)?;
        body.append_child(&bar)?;
        Ok((audio_btn, hint, theme_btn))
    }

    fn setup_global_controls(shell: &mut Shell, rc: &ShellRc) {
        // Audio on/off
        {
            let rc = rc.clone();
            let sub = EventSubscription::new(shell.audio_btn.as_ref(), "click", move |_| {
                let mut shell = rc.borrow_mut();
                shell.app.toggle_audio();
                refresh_audio_ui(&shell);
            });
            shell.global_subs.push(sub);
        }

        // Light/dark
        {
            let rc = rc.clone();
            let sub = EventSubscription::new(shell.theme_btn.as_ref(), "click", move |_| {
                let mut shell = rc.borrow_mut();
                shell.app.toggle_theme();
                apply_theme(&shell);
            });
            shell.global_subs.push(sub);
        }

        // Decode/load failures: audio goes dark, the card keeps working
        {
            let rc = rc.clone();
            let sub = EventSubscription::new(shell.audio.as_ref(), "error", move |_| {
                let mut shell = rc.borrow_mut();
                shell.app.session_mut().media_failed("audio element error");
                refresh_audio_ui(&shell);
            });
            shell.global_subs.push(sub);
        }
    }

    fn apply_theme(shell: &Shell) {
        let dark = shell.app.prefs().dark_theme;
        let _ = shell.body.class_list().toggle_with_force("dark", dark);
        shell
            .theme_btn
            .set_text_content(Some(if dark { "\u{2600}" } else { "\u{263e}" }));
    }

    fn refresh_audio_ui(shell: &Shell) {
        let session = shell.app.session();
        let btn = &shell.audio_btn;
        if session.faulted() {
            btn.set_text_content(Some("\u{2715}"));
            let _ = btn.set_attribute("disabled", "disabled");
        } else {
            btn.set_text_content(Some(if session.enabled() { "\u{266a}" } else { "\u{266a}\u{0338}" }));
        }
        let _ = btn
            .class_list()
            .toggle_with_force("on", session.enabled() && !session.faulted());
        let show_hint = session.enabled() && session.needs_gesture();
        let _ = shell
            .audio_hint
            .class_list()
            .toggle_with_force("hidden", !show_hint);
    }

    /// Register the one-shot retry for the next pointerdown anywhere.
    /// The session ignores a gesture it no longer needs, and the browser
    /// removes the listener itself (`once`), so re-arming just replaces the
    /// previous guard.
    fn arm_gesture_listener(shell: &mut Shell, rc: &ShellRc) {
        let rc2 = rc.clone();
        let sub = EventSubscription::once(shell.window.as_ref(), "pointerdown", move |_| {
            let mut shell = rc2.borrow_mut();
            shell.app.session_mut().on_user_gesture();
            refresh_audio_ui(&shell);
        });
        shell.gesture_sub = Some(sub);
    }

    /// (Re)subscribe to the audio element for the current spec. Each closure
    /// carries the epoch it was registered under, so a callback queued
    /// against a replaced source is ignored by the session.
    fn rebuild_audio_subs(shell: &mut Shell, rc: &ShellRc) {
        shell.audio_subs.clear();
        let epoch = shell.app.session().epoch();

        {
            let rc = rc.clone();
            let sub = EventSubscription::new(shell.audio.as_ref(), "timeupdate", move |_| {
                let mut shell = rc.borrow_mut();
                let position = shell.app.session().sink().position();
                shell.app.session_mut().on_time_update(epoch, position);
            });
            shell.audio_subs.push(sub);
        }
        {
            let rc = rc.clone();
            let sub = EventSubscription::new(shell.audio.as_ref(), "ended", move |_| {
                rc.borrow_mut().app.session_mut().on_ended(epoch);
            });
            shell.audio_subs.push(sub);
        }
    }

    // === Screen transitions =================================================

    /// Apply a state transition and, if it happened, swap screens with the
    /// exit/enter animation. State and MediaSpec switch together inside
    /// `apply`; everything visual follows.
    fn perform_transition(rc: &ShellRc, apply: fn(&mut App<ElementSink>) -> bool) {
        let mut shell = rc.borrow_mut();
        if !apply(&mut shell.app) {
            return;
        }

        // The outgoing screen is done: kill its timers and listeners so
        // nothing fires into the next screen
        shell.timers.clear();
        shell.screen_subs.clear();
        shell.commit_timer = None;
        rebuild_audio_subs(&mut shell, rc);
        refresh_audio_ui(&shell);

        // Exit animation; input is dead from the first frame
        let style = shell.main.style();
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property(
            "transition",
            &format!(
                "opacity {TRANSITION_OUT_SECS}s ease-in, transform {TRANSITION_OUT_SECS}s ease-in, filter {TRANSITION_OUT_SECS}s ease-in"
            ),
        );
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transform", "translateY(-18px)");
        let _ = style.set_property("filter", "blur(8px)");

        let rc2 = rc.clone();
        shell
            .timers
            .schedule((TRANSITION_OUT_SECS * 1000.0) as u32, move || {
                mount_current(&rc2);
            });
    }

    /// Build the DOM for whatever screen the app is on and play the enter
    /// half of the swap animation.
    fn mount_current(rc: &ShellRc) {
        let mut shell = rc.borrow_mut();
        shell.main.set_inner_html("");

        // Enter starts from the inverse of the exit pose
        let style = shell.main.style();
        let _ = style.set_property("transition", "none");
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transform", "translateY(18px)");
        let _ = style.set_property("filter", "blur(6px)");
        let _ = style.set_property("pointer-events", "auto");

        let result = match shell.app.screen() {
            Screen::Intro => mount_intro(&mut shell, rc),
            Screen::Question => mount_question(&mut shell, rc),
            Screen::Celebration => mount_celebration(&mut shell, rc),
        };
        if let Err(err) = result {
            log::error!("mount failed: {err:?}");
        }

        let enter_secs = TRANSITION_TOTAL_SECS - TRANSITION_OUT_SECS;
        let main = shell.main.clone();
        shell.timers.schedule(30, move || {
            let style = main.style();
            let _ = style.set_property(
                "transition",
                &format!(
                    "opacity {enter_secs}s ease-out, transform {enter_secs}s ease-out, filter {enter_secs}s ease-out"
                ),
            );
            let _ = style.set_property("opacity", "1");
            let _ = style.set_property("transform", "translateY(0)");
            let _ = style.set_property("filter", "blur(0)");
        });
    }

    // === Intro ==============================================================

    fn mount_intro(shell: &mut Shell, rc: &ShellRc) -> Result<(), JsValue> {
        let document = shell.document.clone();
        let card = create_el(&document, "div", "card intro")?;
        let lines_box = create_el(&document, "div", "intro-lines")?;
        card.append_child(&lines_box)?;

        let content = shell.app.content();
        for idx in 0..shell.app.intro().revealed() {
            let line = create_el(&document, "p", "intro-line")?;
            line.set_text_content(Some(&content.intro_lines[idx]));
            lines_box.append_child(&line)?;
        }
        dim_older_lines(&lines_box);

        let button = create_el(&document, "button", "btn primary intro-btn")?;
        button.set_text_content(Some(&content.intro_button));
        if !shell.app.intro().complete() {
            let _ = button.class_list().add_1("invisible");
        }
        card.append_child(&button)?;

        let skip = create_el(&document, "p", "skip-hint")?;
        skip.set_text_content(Some("Tap anywhere to skip"));
        card.append_child(&skip)?;
        shell.main.append_child(&card)?;

        // Button and tap-anywhere both advance
        {
            let rc = rc.clone();
            let sub = EventSubscription::new(button.as_ref(), "click", move |event| {
                event.stop_propagation();
                perform_transition(&rc, |app| app.advance());
            });
            shell.screen_subs.push(sub);
        }
        {
            let rc = rc.clone();
            let sub = EventSubscription::new(card.as_ref(), "click", move |_| {
                perform_transition(&rc, |app| app.advance());
            });
            shell.screen_subs.push(sub);
        }

        schedule_intro_tick(shell, rc, lines_box, button);
        Ok(())
    }

    /// One timer per reveal step; the last one is the auto-advance. Each
    /// fired step schedules the next, and all of them die with the screen.
    fn schedule_intro_tick(
        shell: &mut Shell,
        rc: &ShellRc,
        lines_box: HtmlElement,
        button: HtmlElement,
    ) {
        let Some(delay) = shell.app.intro().next_delay_ms() else {
            return;
        };
        let auto_advance = shell.app.intro().complete();
        let rc2 = rc.clone();
        shell.timers.schedule(delay, move || {
            if auto_advance {
                perform_transition(&rc2, |app| app.advance());
                return;
            }
            let mut shell = rc2.borrow_mut();
            if shell.app.intro_mut().reveal_next() {
                let idx = shell.app.intro().revealed() - 1;
                let text = shell.app.content().intro_lines[idx].clone();
                if let Ok(line) = create_el(&shell.document, "p", "intro-line") {
                    line.set_text_content(Some(&text));
                    let _ = lines_box.append_child(&line);
                    dim_older_lines(&lines_box);
                }
            }
            if shell.app.intro().complete() {
                let _ = button.class_list().remove_1("invisible");
            }
            schedule_intro_tick(&mut shell, &rc2, lines_box.clone(), button.clone());
        });
    }

    /// The newest line reads full strength; earlier ones fade back
    fn dim_older_lines(lines_box: &HtmlElement) {
        let children = lines_box.children();
        let count = children.length();
        for idx in 0..count {
            if let Some(line) = children.item(idx) {
                let _ = line
                    .class_list()
                    .toggle_with_force("dim", idx + 1 != count);
            }
        }
    }

    // === Question ===========================================================

    fn mount_question(shell: &mut Shell, rc: &ShellRc) -> Result<(), JsValue> {
        let document = shell.document.clone();
        let content = shell.app.content();

        let card = create_el(&document, "div", "card question")?;
        let title = create_el(&document, "h1", "title")?;
        title.set_text_content(Some(&content.question_title));
        let subtext = create_el(&document, "p", "subtext")?;
        subtext.set_text_content(Some(&content.question_subtext));
        card.append_child(&title)?;
        card.append_child(&subtext)?;

        let row = create_el(&document, "div", "button-row")?;
        let yes_btn = create_el(&document, "button", "btn primary yes-btn")?;
        yes_btn.set_text_content(Some(&content.yes_button));
        let no_btn = create_el(&document, "button", "btn no-btn")?;
        no_btn.set_text_content(Some(&content.no_button));
        no_btn.set_attribute("aria-disabled", "true")?;
        row.append_child(&yes_btn)?;
        row.append_child(&no_btn)?;
        card.append_child(&row)?;

        let microcopy = create_el(&document, "p", "microcopy")?;
        card.append_child(&microcopy)?;
        shell.main.append_child(&card)?;

        // Yes: the only way forward
        {
            let rc = rc.clone();
            let sub = EventSubscription::new(yes_btn.as_ref(), "click", move |_| {
                perform_transition(&rc, |app| app.confirm());
            });
            shell.screen_subs.push(sub);
        }

        // No can never be activated
        for event in ["click", "pointerdown"] {
            let sub = EventSubscription::new(no_btn.as_ref(), event, move |event| {
                event.prevent_default();
                event.stop_propagation();
            });
            shell.screen_subs.push(sub);
        }

        // Continuous tracking across the whole window
        {
            let rc = rc.clone();
            let no_btn = no_btn.clone();
            let microcopy = microcopy.clone();
            let sub = EventSubscription::new(shell.window.as_ref(), "pointermove", move |event| {
                if let Some(pointer) = pointer_pos(&event) {
                    evade_check(&rc, &no_btn, &microcopy, pointer);
                }
            });
            shell.screen_subs.push(sub);
        }

        // Fast pointers can land on the button between two move events;
        // entering its hit area forces the check immediately
        {
            let rc = rc.clone();
            let no_btn_for_rect = no_btn.clone();
            let microcopy = microcopy.clone();
            let sub = EventSubscription::new(no_btn.as_ref(), "pointerenter", move |event| {
                if let Some(pointer) = pointer_pos(&event) {
                    evade_check(&rc, &no_btn_for_rect, &microcopy, pointer);
                }
            });
            shell.screen_subs.push(sub);
        }

        Ok(())
    }

    fn pointer_pos(event: &web_sys::Event) -> Option<Vec2> {
        let pointer = event.dyn_ref::<PointerEvent>()?;
        Some(Vec2::new(pointer.client_x() as f32, pointer.client_y() as f32))
    }

    fn button_bounds(button: &HtmlElement) -> BoxRect {
        let rect = button.get_bounding_client_rect();
        BoxRect::new(
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
        )
    }

    fn evade_check(rc: &ShellRc, no_btn: &HtmlElement, microcopy: &HtmlElement, pointer: Vec2) {
        let mut shell = rc.borrow_mut();
        let bounds = button_bounds(no_btn);
        let Some(mv) = shell
            .app
            .evasion_mut()
            .on_pointer_move(pointer, bounds, viewport(), now_ms())
        else {
            return;
        };
        apply_dodge(&mut shell, rc, no_btn, mv);

        if let Some(line) = shell.app.tease_line() {
            microcopy.set_text_content(Some(line));
            let _ = microcopy.class_list().add_1("visible");
        }
    }

    /// Animate the button to its new offset. The commit timer fires when the
    /// animation settles; a newer dodge replaces (and thereby cancels) it, so
    /// the engine's committed offset only ever advances on completed moves.
    fn apply_dodge(shell: &mut Shell, rc: &ShellRc, no_btn: &HtmlElement, mv: EvadeMove) {
        let style = no_btn.style();
        let _ = style.set_property(
            "transition",
            &format!("transform {}s cubic-bezier(0.33, 1, 0.68, 1)", mv.duration_secs),
        );
        let _ = style.set_property(
            "transform",
            &format!("translate({}px, {}px)", mv.offset.x, mv.offset.y),
        );

        let rc2 = rc.clone();
        shell.commit_timer = Timeout::new((mv.duration_secs * 1000.0) as u32, move || {
            rc2.borrow_mut().app.evasion_mut().commit(mv.offset);
        });
    }

    // === Celebration ========================================================

    fn mount_celebration(shell: &mut Shell, rc: &ShellRc) -> Result<(), JsValue> {
        let document = shell.document.clone();
        let content = shell.app.content();

        let petal_layer = create_el(&document, "div", "petal-layer")?;
        shell.main.append_child(&petal_layer)?;

        let card = create_el(&document, "div", "card celebration")?;
        let heart = create_el(&document, "div", "heart")?;
        heart.set_text_content(Some("\u{1f496}"));
        let title = create_el(&document, "h2", "title")?;
        title.set_text_content(Some(&content.celebration_title));
        let body_text = create_el(&document, "p", "body-text")?;
        body_text.set_text_content(Some(&content.celebration_body));
        let signature = create_el(&document, "p", "signature")?;
        signature.set_text_content(Some(&content.signature));
        let restart_btn = create_el(&document, "button", "btn restart-btn")?;
        restart_btn.set_text_content(Some("Start Over"));

        card.append_child(&heart)?;
        card.append_child(&title)?;
        card.append_child(&body_text)?;
        card.append_child(&signature)?;
        card.append_child(&restart_btn)?;
        shell.main.append_child(&card)?;

        {
            let rc = rc.clone();
            let sub = EventSubscription::new(restart_btn.as_ref(), "click", move |_| {
                perform_transition(&rc, |app| app.restart());
            });
            shell.screen_subs.push(sub);
        }

        spawn_petal_dom(&document, &petal_layer)?;
        Ok(())
    }

    fn spawn_petal_dom(document: &Document, layer: &HtmlElement) -> Result<(), JsValue> {
        let seed = js_sys::Date::now() as u64;
        for petal in petals::spawn_field(seed, PETAL_COUNT, viewport()) {
            let el = create_el(document, "div", "petal")?;
            let style = el.style();
            let _ = style.set_property("width", &format!("{}px", petal.size));
            let _ = style.set_property("height", &format!("{}px", petal.size * 0.8));
            let _ = style.set_property("background-color", PETAL_COLORS[petal.color]);
            let _ = style.set_property("left", &format!("{}px", petal.start_x));
            let _ = style.set_property("--drift", &format!("{}px", petal.drift_x));
            let _ = style.set_property("--spin", &format!("{}deg", petal.rotation_deg));
            let _ = style.set_property(
                "animation",
                &format!(
                    "petal-fall {}s linear {}s infinite",
                    petal.fall_secs, petal.delay_secs
                ),
            );
            layer.append_child(&el)?;
        }
        Ok(())
    }

    // === Skin ===============================================================

    fn inject_stylesheet(document: &Document, body: &HtmlElement) -> Result<(), JsValue> {
        let style = document.create_element("style")?;
        style.set_text_content(Some(STYLESHEET));
        body.append_child(&style)?;
        Ok(())
    }

    const STYLESHEET: &str = r#"
        * { margin: 0; box-sizing: border-box; }
        body {
            min-height: 100vh; overflow: hidden;
            display: flex; align-items: center; justify-content: center;
            background: #fcf9f7; color: #374151;
            font-family: Georgia, 'Times New Roman', serif;
            transition: background 0.4s ease, color 0.4s ease;
        }
        body.dark { background: #0d0607; color: #f1e7d6; }
        .card-stage { position: relative; z-index: 10; width: 100%; max-width: 42rem; padding: 0 1.5rem; }
        .card {
            padding: 3rem; border-radius: 1.5rem; text-align: center;
            background: rgba(255, 255, 255, 0.4); border: 1px solid rgba(255, 255, 255, 0.6);
            box-shadow: 0 20px 45px rgba(0, 0, 0, 0.08); backdrop-filter: blur(12px);
        }
        body.dark .card {
            background: rgba(18, 7, 7, 0.85); border-color: #2a1414;
            box-shadow: 0 20px 60px rgba(0, 0, 0, 0.6);
        }
        .title { font-size: 2.5rem; line-height: 1.2; margin-bottom: 1rem; }
        .subtext, .body-text { font-family: sans-serif; font-weight: 300; color: #6b7280; }
        body.dark .subtext, body.dark .body-text { color: #cdbba8; }
        .btn {
            font: inherit; cursor: pointer; border-radius: 9999px;
            padding: 0.75rem 2rem; border: 1px solid #d1d5db;
            background: #f3f4f6; color: #6b7280; user-select: none;
        }
        body.dark .btn { background: #111517; color: #cdbba8; border-color: #2b2f33; }
        .btn.primary {
            background: #f43f5e; border-color: #dc2626; color: #fff;
            font-size: 1.5rem; padding: 1.25rem 4rem;
            transition: transform 0.2s ease, background 0.2s ease;
        }
        .btn.primary:hover { background: #be123c; transform: scale(1.05); }
        body.dark .btn.primary { background: #c10015; border-color: #7f0a14; }
        .button-row {
            display: flex; align-items: center; justify-content: center;
            gap: 1.5rem; margin-top: 2.5rem; flex-wrap: wrap;
        }
        .no-btn { position: relative; z-index: 5; }
        .microcopy {
            margin-top: 1.5rem; font-size: 0.8rem; font-style: italic;
            color: #fb7185; opacity: 0; transition: opacity 0.5s ease;
        }
        body.dark .microcopy { color: #b9878c; }
        .microcopy.visible { opacity: 1; }
        .intro-lines { display: flex; flex-direction: column; gap: 1.5rem; min-height: 16rem; justify-content: center; }
        .intro-line { font-size: 1.75rem; transition: opacity 0.9s ease, font-size 0.9s ease; }
        .intro-line.dim { opacity: 0.4; font-size: 1.4rem; }
        .intro-btn { margin-top: 2rem; transition: opacity 1s ease; }
        .intro-btn.invisible { opacity: 0; pointer-events: none; }
        .skip-hint { margin-top: 2rem; font-size: 0.75rem; font-style: italic; color: #9ca3af; }
        .controls { position: fixed; top: 2rem; right: 2rem; z-index: 100; display: flex; align-items: center; gap: 0.75rem; }
        .ctl-btn {
            width: 3rem; height: 3rem; border-radius: 9999px; cursor: pointer;
            border: 1px solid #fce7f3; background: #fff; color: #d1d5db;
            font-size: 1.1rem; box-shadow: 0 4px 10px rgba(0, 0, 0, 0.08);
        }
        .ctl-btn.on { color: #f43f5e; }
        body.dark .ctl-btn { background: #1a0d0e; border-color: #2a1414; }
        .audio-hint {
            font-size: 0.65rem; text-transform: uppercase; letter-spacing: 0.15em;
            color: #fda4af; background: #fff; padding: 0.3rem 0.8rem;
            border-radius: 9999px; box-shadow: 0 2px 6px rgba(0, 0, 0, 0.06);
        }
        .hidden { display: none; }
        .footer {
            position: fixed; bottom: 1.5rem; left: 0; right: 0; text-align: center;
            font-size: 0.625rem; letter-spacing: 0.2em; text-transform: uppercase;
            color: #9ca3af; pointer-events: none;
        }
        .heart { font-size: 3.5rem; margin-bottom: 1rem; }
        .signature { margin-top: 1rem; font-style: italic; color: #fb7185; }
        .petal-layer { position: fixed; inset: 0; pointer-events: none; z-index: 0; }
        .petal {
            position: fixed; top: -50px; opacity: 0; pointer-events: none;
            border-radius: 0 100% 0 100%;
        }
        @keyframes petal-fall {
            0% { transform: translate(0, 0) rotate(0deg); opacity: 0; }
            10% { opacity: 0.8; }
            100% { transform: translate(var(--drift), 110vh) rotate(var(--spin)); opacity: 0.8; }
        }
    "#;
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_card::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine Card (native) starting...");
    log::info!("This is a browser experience - run with `trunk serve` for the web version");

    println!("\nRunning evasion smoke check...");
    smoke_check_evasion();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check_evasion() {
    use glam::Vec2;
    use valentine_card::evasion::EvasionEngine;
    use valentine_card::{BoxRect, Viewport};

    let mut engine = EvasionEngine::new();
    let bounds = BoxRect::new(Vec2::new(600.0, 380.0), Vec2::new(120.0, 48.0));
    let viewport = Viewport::new(1280.0, 800.0);

    let mv = engine
        .on_pointer_move(bounds.center(), bounds, viewport, 0.0)
        .expect("pointer on the button must trigger a dodge");
    assert!(mv.offset != Vec2::ZERO, "dodge must move the button");
    println!("OK - dodge to {:?}", mv.offset);
}
