/// iced widgets for the cart screen
///
/// Consumes the render tree built by `cart_view::render`. Every row and
/// control is wrapped in a container whose id is `<test id>-<item id>`
/// (or just the test id for singletons), so the window can be inspected
/// by id instead of by pixels.
use iced::widget::{button, column, container, image, row, scrollable, text, text_input, Column, Row, Space};
use iced::{Alignment, Element, Length};
use std::path::Path;

use super::cart_view::{CartScreen, CartTable, Control, Footer, RowNode};
use crate::config::resolve_image;
use crate::Message;

/// Relative widths of the image, product, quantity, subtotal and delete columns
const COLUMN_PORTIONS: [u16; 5] = [2, 5, 3, 3, 1];

/// Relative product images are loaded from `assets_dir`
pub fn view<'a>(screen: CartScreen, assets_dir: &Path) -> Element<'a, Message> {
    match screen {
        CartScreen::Empty { test_id, message } => container(text(message).size(32))
            .id(container::Id::new(test_id))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(40)
            .into(),
        CartScreen::Populated(table) => view_table(table, assets_dir),
    }
}

fn view_table<'a>(table: CartTable, assets_dir: &Path) -> Element<'a, Message> {
    let header = Row::with_children(table.headers.into_iter().zip(COLUMN_PORTIONS).map(
        |(caption, portion)| -> Element<'a, Message> {
            text(caption)
                .size(14)
                .width(Length::FillPortion(portion))
                .into()
        },
    ))
    .spacing(12);

    let rows = Column::with_children(
        table
            .rows
            .into_iter()
            .map(|node| view_row(node, assets_dir)),
    )
    .spacing(8);

    column![header, scrollable(rows).height(Length::Fill), view_footer(table.footer)]
        .spacing(16)
        .into()
}

fn view_row<'a>(node: RowNode, assets_dir: &Path) -> Element<'a, Message> {
    let key = node.key;
    let row_data = node.row;
    let (amount_id, amount) = node.amount_field;

    let stepper = row![
        view_control(key, node.decrement, "−"),
        text_input("", &amount)
            .id(text_input::Id::new(format!("{amount_id}-{key}")))
            .width(48),
        view_control(key, node.increment, "+"),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let picture = image::Handle::from_path(resolve_image(assets_dir, &row_data.image));

    let content = row![
        container(image(picture).width(80).height(80))
            .width(Length::FillPortion(COLUMN_PORTIONS[0])),
        column![
            text(row_data.title).size(16),
            text(row_data.price_formatted).size(14),
        ]
        .spacing(4)
        .width(Length::FillPortion(COLUMN_PORTIONS[1])),
        container(stepper).width(Length::FillPortion(COLUMN_PORTIONS[2])),
        text(row_data.subtotal)
            .size(16)
            .width(Length::FillPortion(COLUMN_PORTIONS[3])),
        container(view_control(key, node.remove, "✕"))
            .width(Length::FillPortion(COLUMN_PORTIONS[4])),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(content)
        .id(container::Id::new(format!("{}-{key}", node.test_id)))
        .padding(8)
        .into()
}

/// A button that sends its action, or a disabled one when there is none
fn view_control<'a>(key: i64, control: Control, label: &'a str) -> Element<'a, Message> {
    container(
        button(text(label))
            .on_press_maybe(control.action.map(Message::Cart))
            .padding([4, 10]),
    )
    .id(container::Id::new(format!("{}-{key}", control.test_id)))
    .into()
}

fn view_footer<'a>(footer: Footer) -> Element<'a, Message> {
    // No action is ever attached to the finalize button
    let finalize = container(
        button(text(footer.finalize_label))
            .on_press_maybe(footer.finalize.action.map(Message::Cart))
            .padding([10, 20]),
    )
    .id(container::Id::new(footer.finalize.test_id));

    row![
        finalize,
        Space::with_width(Length::Fill),
        column![
            text(footer.total_label).size(14),
            text(footer.total).size(28),
        ]
        .align_x(Alignment::End),
    ]
    .align_y(Alignment::Center)
    .into()
}
