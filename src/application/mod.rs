pub mod upload_card_image;
