//! Scene furniture around the grid: background, volume toggle, life
//! indicators, and the title / victory / game-over prompts.

use crate::assets::{sounds, textures};
use crate::core::{AnimationId, ObjectId, Point, RoundConfig, Size};
use crate::host::{
    Animator, AudioHost, CameraFade, Easing, Property, Repeat, SceneHost, SoundOptions, SpawnSpec, Tween,
};
use crate::lifecycle::ResourceRegistry;

/// Prompts parked here are off-screen.
pub const PARKED_Y: f32 = -1000.0;
pub const FADE_IN_MS: u32 = 500;
pub const VOLUME_ICON_POSITION: Point = Point::new(532.0, 350.0);
const VOLUME_ICON_SIZE: Size = Size::new(36.0, 36.0);
const HEART_SIZE: Size = Size::new(24.0, 22.0);
const HEART_Y: f32 = 20.0;
const HEART_LEFT: f32 = 140.0;
const HEART_SPACING: f32 = 30.0;
const WHOOSH_VOLUME: f32 = 1.3;

/// The three text prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prompt {
    Title,
    Victory,
    GameOver,
}

impl Prompt {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Prompt::Title => "Marshmallow\nKingdom\n🌙 Memory 🌙\nGame\nClick to Play!",
            Prompt::Victory => "🎉 You Win! 🎉\nPlay again? ♥",
            Prompt::GameOver => "Oopsie!\n✨ Try Again? ✨\n Click to Restart",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Prompt::Title => "#F294EC",
            Prompt::Victory => "#D9A577",
            Prompt::GameOver => "#4E8AD9",
        }
    }

    #[must_use]
    pub fn hover_color(self) -> &'static str {
        match self {
            Prompt::Title => "#F2D0F2",
            Prompt::Victory => "#F2D7B6",
            Prompt::GameOver => "#94CEF2",
        }
    }

    fn size(self) -> Size {
        let lines = self.text().lines().count() as f32;
        Size::new(320.0, 48.0 * lines)
    }
}

/// Object handles for everything that is not a card.
#[derive(Clone, Debug, Default)]
pub struct Hud {
    volume_icon: Option<ObjectId>,
    title: Option<ObjectId>,
    victory: Option<ObjectId>,
    game_over: Option<ObjectId>,
    hearts: Vec<ObjectId>,
    leaving: Option<Prompt>,
    hovered: Option<Prompt>,
}

impl Hud {
    /// Build the title screen: fade in, background, volume icon, blinking
    /// title.
    pub(crate) fn create<H>(host: &mut H, config: &RoundConfig, resources: &mut ResourceRegistry) -> Self
    where
        H: SceneHost + Animator + AudioHost + ?Sized,
    {
        host.fade_camera(CameraFade::In, FADE_IN_MS);

        let center = Point::new(config.canvas.width / 2.0, config.canvas.height / 2.0);
        let background = host.spawn(SpawnSpec::texture(textures::BACKGROUND, center, config.canvas).with_depth(-1));
        resources.track_object(background);

        let icon_texture = if host.volume() == 0.0 {
            textures::VOLUME_OFF
        } else {
            textures::VOLUME_ON
        };
        let volume_icon = host.spawn(
            SpawnSpec::texture(icon_texture, VOLUME_ICON_POSITION, VOLUME_ICON_SIZE)
                .with_depth(1)
                .with_name("volume-icon"),
        );
        if host.volume() == 0.0 {
            host.set_property(volume_icon, Property::Alpha, 0.5);
        }
        resources.track_object(volume_icon);

        let title = spawn_prompt(host, Prompt::Title, center, resources);
        let blink = host.animate(
            Tween::object(title, Property::Alpha, 0.0)
                .duration(800)
                .easing(Easing::Blink)
                .repeat(Repeat::Forever)
                .yoyo(),
        );
        resources.track_animation(blink);

        Self {
            volume_icon: Some(volume_icon),
            title: Some(title),
            ..Self::default()
        }
    }

    /// Park the victory and game-over prompts above the canvas.
    pub(crate) fn deal_prompts<H>(&mut self, host: &mut H, config: &RoundConfig, resources: &mut ResourceRegistry)
    where
        H: SceneHost + ?Sized,
    {
        let parked = Point::new(config.canvas.width / 2.0, PARKED_Y);
        self.victory = Some(spawn_prompt(host, Prompt::Victory, parked, resources));
        self.game_over = Some(spawn_prompt(host, Prompt::GameOver, parked, resources));
    }

    /// Spawn one life indicator per life and slide them in from the right.
    pub(crate) fn deal_hearts<H>(
        &mut self,
        host: &mut H,
        config: &RoundConfig,
        lives: u32,
        resources: &mut ResourceRegistry,
    ) where
        H: SceneHost + Animator + ?Sized,
    {
        for index in 0..lives {
            let start = Point::new(config.canvas.width + 1000.0, HEART_Y);
            let heart = host.spawn(SpawnSpec::texture(textures::HEART, start, HEART_SIZE));
            resources.track_object(heart);

            let slide = host.animate(
                Tween::object(heart, Property::X, HEART_LEFT + HEART_SPACING * index as f32)
                    .duration(1000)
                    .delay(index.saturating_mul(200).saturating_add(1000))
                    .easing(Easing::ExpoInOut),
            );
            resources.track_animation(slide);
            self.hearts.push(heart);
        }
    }

    /// Detach the last life indicator and send it upward.
    ///
    /// The indicator is removed from the HUD immediately; the caller destroys
    /// the object when the returned animation completes.
    pub(crate) fn retract_heart<H>(
        &mut self,
        host: &mut H,
        resources: &mut ResourceRegistry,
    ) -> Option<(AnimationId, ObjectId)>
    where
        H: SceneHost + Animator + ?Sized,
    {
        let heart = self.hearts.pop()?;
        let retract = host.animate(
            Tween::object(heart, Property::Y, PARKED_Y)
                .duration(1000)
                .easing(Easing::ExpoInOut),
        );
        resources.track_animation(retract);
        Some((retract, heart))
    }

    /// Drop a prompt to the centre of the canvas.
    pub(crate) fn show<H>(
        &mut self,
        host: &mut H,
        prompt: Prompt,
        config: &RoundConfig,
        resources: &mut ResourceRegistry,
    ) -> Option<AnimationId>
    where
        H: SceneHost + Animator + ?Sized,
    {
        let object = self.object(prompt)?;
        let drop_in = host.animate(
            Tween::object(object, Property::Y, config.canvas.height / 2.0).easing(Easing::BounceOut),
        );
        resources.track_animation(drop_in);
        Some(drop_in)
    }

    /// Send a prompt away after it was clicked. Returns `None` if it is
    /// already leaving.
    pub(crate) fn dismiss<H>(
        &mut self,
        host: &mut H,
        prompt: Prompt,
        resources: &mut ResourceRegistry,
    ) -> Option<AnimationId>
    where
        H: SceneHost + Animator + AudioHost + ?Sized,
    {
        if self.leaving == Some(prompt) {
            return None;
        }
        let object = self.object(prompt)?;
        self.leaving = Some(prompt);

        if prompt != Prompt::GameOver {
            host.play(sounds::WHOOSH, SoundOptions::volume(WHOOSH_VOLUME));
        }
        let leave = host.animate(Tween::object(object, Property::Y, PARKED_Y).easing(Easing::BounceInOut));
        resources.track_animation(leave);
        Some(leave)
    }

    /// Whether `point` is on the given prompt.
    pub(crate) fn prompt_hit<H>(&self, host: &H, prompt: Prompt, point: Point) -> bool
    where
        H: SceneHost + ?Sized,
    {
        self.object(prompt).is_some_and(|object| host.hit_test(object, point))
    }

    pub(crate) fn volume_hit<H>(&self, host: &H, point: Point) -> bool
    where
        H: SceneHost + ?Sized,
    {
        self.volume_icon.is_some_and(|icon| host.hit_test(icon, point))
    }

    /// Mute or unmute and update the icon. Returns the new volume.
    pub(crate) fn toggle_volume<H>(&self, host: &mut H) -> f32
    where
        H: SceneHost + AudioHost + ?Sized,
    {
        let (volume, texture, alpha) = if host.volume() == 0.0 {
            (1.0, textures::VOLUME_ON, 1.0)
        } else {
            (0.0, textures::VOLUME_OFF, 0.5)
        };
        host.set_volume(volume);
        if let Some(icon) = self.volume_icon {
            host.set_texture(icon, texture);
            host.set_property(icon, Property::Alpha, alpha);
        }
        volume
    }

    /// Highlight the hovered prompt and restore the previous one.
    pub(crate) fn hover<H>(&mut self, host: &mut H, prompt: Option<Prompt>)
    where
        H: SceneHost + ?Sized,
    {
        if self.hovered == prompt {
            return;
        }
        if let Some(previous) = self.hovered.and_then(|p| self.object(p).map(|o| (p, o))) {
            host.set_text_color(previous.1, previous.0.color());
        }
        if let Some((p, object)) = prompt.and_then(|p| self.object(p).map(|o| (p, o))) {
            host.set_text_color(object, p.hover_color());
        }
        self.hovered = prompt;
    }

    // === Accessors ===

    #[must_use]
    pub fn object(&self, prompt: Prompt) -> Option<ObjectId> {
        match prompt {
            Prompt::Title => self.title,
            Prompt::Victory => self.victory,
            Prompt::GameOver => self.game_over,
        }
    }

    /// Life indicators still on screen, left to right.
    #[must_use]
    pub fn hearts(&self) -> &[ObjectId] {
        &self.hearts
    }

    #[must_use]
    pub fn volume_icon(&self) -> Option<ObjectId> {
        self.volume_icon
    }
}

fn spawn_prompt<H>(host: &mut H, prompt: Prompt, position: Point, resources: &mut ResourceRegistry) -> ObjectId
where
    H: SceneHost + ?Sized,
{
    let object = host.spawn(
        SpawnSpec::text(prompt.text(), prompt.color(), position, prompt.size())
            .with_depth(3)
            .with_name(format!("{prompt:?}")),
    );
    resources.track_object(object);
    object
}
