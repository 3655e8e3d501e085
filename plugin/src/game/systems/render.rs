use bevy::prelude::*;

use crate::game::ResolvedTheme;
use crate::game::systems::types::DisplayRegionText;
use crate::ws::{ConnectionEvent, DisplayRegion, DisplaySurface, ServerMessage, apply_event};
use crate::ws_bevy::ConnectionEventReceiver;

type RegionQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static DisplayRegionText,
        &'static mut Text,
        &'static mut TextColor,
    ),
>;

/// Drain pending connection events and write them into the display regions
pub fn process_connection_events(
    receiver: Option<Res<ConnectionEventReceiver>>,
    theme: Option<Res<ResolvedTheme>>,
    mut regions: RegionQuery,
) {
    let Some(receiver) = receiver else {
        return;
    };

    while let Some(event) = receiver.try_recv() {
        apply_event(&event, &mut RegionTexts(&mut regions));

        if let (Some(theme), ConnectionEvent::Message(ServerMessage::Result(result))) =
            (theme.as_deref(), &event)
        {
            let tint = theme.outcome_color(result.outcome);
            for (region, _, mut color) in regions.iter_mut() {
                if region.0 == DisplayRegion::Result {
                    color.0 = tint;
                }
            }
        }
    }
}

/// The display regions as seen by `apply_event`.
struct RegionTexts<'a, 'w, 's>(&'a mut RegionQuery<'w, 's>);

impl DisplaySurface for RegionTexts<'_, '_, '_> {
    fn set_text(&mut self, region: DisplayRegion, text: &str) {
        let mut written = false;
        for (tag, mut current, _) in self.0.iter_mut() {
            if tag.0 == region {
                current.0 = text.to_string();
                written = true;
            }
        }

        if !written {
            log::warn!("No #{} region to write to", region.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::Sender;

    use super::*;

    fn app() -> (App, Sender<ConnectionEvent>) {
        let (tx, receiver) = ConnectionEventReceiver::channel();
        let mut app = App::new();
        app.insert_resource(receiver)
            .insert_resource(ResolvedTheme::default())
            .add_systems(Update, process_connection_events);

        for region in [DisplayRegion::ClientCount, DisplayRegion::Result] {
            app.world_mut().spawn((
                DisplayRegionText(region),
                Text::new(""),
                TextColor(Color::WHITE),
            ));
        }
        (app, tx)
    }

    fn region_text(app: &mut App, region: DisplayRegion) -> String {
        let mut query = app
            .world_mut()
            .query::<(&DisplayRegionText, &Text, &TextColor)>();
        query
            .iter(app.world())
            .find(|(tag, _, _)| tag.0 == region)
            .map(|(_, text, _)| text.0.clone())
            .unwrap()
    }

    fn region_color(app: &mut App, region: DisplayRegion) -> Color {
        let mut query = app
            .world_mut()
            .query::<(&DisplayRegionText, &Text, &TextColor)>();
        query
            .iter(app.world())
            .find(|(tag, _, _)| tag.0 == region)
            .map(|(_, _, color)| color.0)
            .unwrap()
    }

    fn message(text: &str) -> ConnectionEvent {
        ConnectionEvent::Message(ServerMessage::parse(text))
    }

    #[test]
    fn client_count_message_fills_client_count_region() {
        let (mut app, tx) = app();
        tx.send(message("Connected clients: 3")).unwrap();
        app.update();

        assert_eq!(
            region_text(&mut app, DisplayRegion::ClientCount),
            "Connected clients: 3"
        );
        assert_eq!(region_text(&mut app, DisplayRegion::Result), "");
    }

    #[test]
    fn result_message_fills_result_region_and_tints_it() {
        let (mut app, tx) = app();
        tx.send(message("You win!")).unwrap();
        app.update();

        assert_eq!(region_text(&mut app, DisplayRegion::Result), "You win!");
        assert_eq!(region_text(&mut app, DisplayRegion::ClientCount), "");
        assert_eq!(
            region_color(&mut app, DisplayRegion::Result),
            ResolvedTheme::default().win
        );
    }

    #[test]
    fn all_pending_events_are_applied_in_one_frame() {
        let (mut app, tx) = app();
        tx.send(message("Connected clients: 1")).unwrap();
        tx.send(message("Result: You lose! (You: 0, Server: 1)"))
            .unwrap();
        tx.send(message("Connected clients: 2")).unwrap();
        app.update();

        assert_eq!(
            region_text(&mut app, DisplayRegion::ClientCount),
            "Connected clients: 2"
        );
        assert_eq!(
            region_text(&mut app, DisplayRegion::Result),
            "Result: You lose! (You: 0, Server: 1)"
        );
    }

    #[test]
    fn close_leaves_both_regions_unchanged() {
        let (mut app, tx) = app();
        tx.send(message("Connected clients: 2")).unwrap();
        tx.send(message("It's a tie!")).unwrap();
        app.update();

        tx.send(ConnectionEvent::Error("reset by peer".to_string()))
            .unwrap();
        tx.send(ConnectionEvent::Closed {
            code: 1006,
            reason: "Connection error".to_string(),
        })
        .unwrap();
        app.update();

        assert_eq!(
            region_text(&mut app, DisplayRegion::ClientCount),
            "Connected clients: 2"
        );
        assert_eq!(region_text(&mut app, DisplayRegion::Result), "It's a tie!");
    }
}
