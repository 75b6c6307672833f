pub mod http_card_repository;
