use bevy::prelude::*;

#[derive(Message)]
pub struct RegenerateCityEvent;

#[derive(Message)]
pub struct NewCitySeedEvent;
